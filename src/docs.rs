// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::create_admin,
        handlers::auth::list_users,

        // --- Empresa ---
        handlers::empresa::list_empresas,
        handlers::empresa::get_empresa,
        handlers::empresa::get_my_empresa,
        handlers::empresa::create_empresa,
        handlers::empresa::update_empresa,
        handlers::empresa::delete_empresa,

        // --- Catálogo ---
        handlers::catalog::list_categorias,
        handlers::catalog::get_categoria,
        handlers::catalog::create_categoria,
        handlers::catalog::update_categoria,
        handlers::catalog::delete_categoria,
        handlers::catalog::list_produtos,
        handlers::catalog::get_produto,
        handlers::catalog::create_produto,
        handlers::catalog::update_produto,
        handlers::catalog::delete_produto,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::Role,
            models::auth::LoginUserPayload,
            models::auth::RegisterUserPayload,
            models::auth::CreateAdminPayload,
            models::auth::LoginResponse,
            models::auth::RegisterResponse,
            models::auth::CreateAdminResponse,
            models::auth::UserSummary,

            // --- Empresa ---
            models::empresa::Empresa,
            models::empresa::EmpresaPayload,

            // --- Catálogo ---
            models::catalog::Categoria,
            models::catalog::CategoriaPayload,
            models::catalog::Produto,
            models::catalog::ProdutoPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, Registro e Administradores"),
        (name = "Empresa", description = "A empresa de cada usuário"),
        (name = "Catalogo", description = "Categorias e Produtos da empresa")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
