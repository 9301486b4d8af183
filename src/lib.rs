//src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

/// Monta o router completo da API sobre um estado já construído.
pub fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas) + listagem de usuários (protegida)
    let admin_routes = Router::new()
        .route("/users", get(handlers::auth::list_users))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .route("/create-admin", post(handlers::auth::create_admin))
        .merge(admin_routes);

    let empresa_routes = Router::new()
        .route("/"
               ,get(handlers::empresa::list_empresas)
               .post(handlers::empresa::create_empresa)
        )
        .route("/my-empresa"
               ,get(handlers::empresa::get_my_empresa)
        )
        .route("/{id}"
               ,get(handlers::empresa::get_empresa)
               .put(handlers::empresa::update_empresa)
               .delete(handlers::empresa::delete_empresa)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let categoria_routes = Router::new()
        .route("/"
               ,get(handlers::catalog::list_categorias)
               .post(handlers::catalog::create_categoria)
        )
        .route("/{id}"
               ,get(handlers::catalog::get_categoria)
               .put(handlers::catalog::update_categoria)
               .delete(handlers::catalog::delete_categoria)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let produto_routes = Router::new()
        .route("/"
               ,get(handlers::catalog::list_produtos)
               .post(handlers::catalog::create_produto)
        )
        .route("/{id}"
               ,get(handlers::catalog::get_produto)
               .put(handlers::catalog::update_produto)
               .delete(handlers::catalog::delete_produto)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/empresa", empresa_routes)
        .nest("/api/categoria", categoria_routes)
        .nest("/api/produto", produto_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
