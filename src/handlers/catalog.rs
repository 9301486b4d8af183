// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::{Categoria, CategoriaPayload, Produto, ProdutoFilter, ProdutoPayload},
};

// ---
// Categorias
// ---

#[utoipa::path(
    get,
    path = "/api/categoria",
    tag = "Catalogo",
    responses(
        (status = 200, description = "Categorias da minha empresa", body = Vec<Categoria>),
        (status = 404, description = "Usuário sem empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categorias(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<Vec<Categoria>>, AppError> {
    let categorias = app_state
        .catalog_service
        .list_categorias(claims.user_id()?)
        .await?;
    Ok(Json(categorias))
}

#[utoipa::path(
    get,
    path = "/api/categoria/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID da Categoria")),
    responses(
        (status = 200, description = "Categoria", body = Categoria),
        (status = 403, description = "Categoria de outra empresa"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_categoria(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Categoria>, AppError> {
    let categoria = app_state
        .catalog_service
        .get_categoria(claims.user_id()?, id)
        .await?;
    Ok(Json(categoria))
}

#[utoipa::path(
    post,
    path = "/api/categoria",
    tag = "Catalogo",
    request_body = CategoriaPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Categoria),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Usuário sem empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_categoria(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CategoriaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let categoria = app_state
        .catalog_service
        .create_categoria(claims.user_id()?, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(categoria)))
}

#[utoipa::path(
    put,
    path = "/api/categoria/{id}",
    tag = "Catalogo",
    request_body = CategoriaPayload,
    params(("id" = Uuid, Path, description = "ID da Categoria")),
    responses(
        (status = 200, description = "Categoria atualizada", body = Categoria),
        (status = 403, description = "Categoria de outra empresa"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_categoria(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<CategoriaPayload>, AppError>,
) -> Result<Json<Categoria>, AppError> {
    payload.validate()?;

    let categoria = app_state
        .catalog_service
        .update_categoria(claims.user_id()?, id, payload)
        .await?;
    Ok(Json(categoria))
}

#[utoipa::path(
    delete,
    path = "/api/categoria/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID da Categoria")),
    responses(
        (status = 200, description = "Categoria excluída"),
        (status = 400, description = "Categoria possui produtos vinculados"),
        (status = 403, description = "Categoria de outra empresa"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_categoria(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_categoria(claims.user_id()?, id)
        .await?;
    Ok(Json(json!({ "message": "Categoria deletada com sucesso" })))
}

// ---
// Produtos
// ---

#[utoipa::path(
    get,
    path = "/api/produto",
    tag = "Catalogo",
    params(ProdutoFilter),
    responses(
        (status = 200, description = "Produtos da minha empresa", body = Vec<Produto>),
        (status = 404, description = "Usuário sem empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_produtos(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(filter): Query<ProdutoFilter>,
) -> Result<Json<Vec<Produto>>, AppError> {
    let produtos = app_state
        .catalog_service
        .list_produtos(claims.user_id()?, filter.categoria_id)
        .await?;
    Ok(Json(produtos))
}

#[utoipa::path(
    get,
    path = "/api/produto/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID do Produto")),
    responses(
        (status = 200, description = "Produto", body = Produto),
        (status = 403, description = "Produto de outra empresa"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_produto(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Produto>, AppError> {
    let produto = app_state
        .catalog_service
        .get_produto(claims.user_id()?, id)
        .await?;
    Ok(Json(produto))
}

#[utoipa::path(
    post,
    path = "/api/produto",
    tag = "Catalogo",
    request_body = ProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 400, description = "Dados inválidos ou categoria de outra empresa"),
        (status = 404, description = "Usuário sem empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_produto(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<ProdutoPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .catalog_service
        .create_produto(claims.user_id()?, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(produto)))
}

#[utoipa::path(
    put,
    path = "/api/produto/{id}",
    tag = "Catalogo",
    request_body = ProdutoPayload,
    params(("id" = Uuid, Path, description = "ID do Produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Produto),
        (status = 400, description = "Dados inválidos ou categoria de outra empresa"),
        (status = 403, description = "Produto de outra empresa"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_produto(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<ProdutoPayload>, AppError>,
) -> Result<Json<Produto>, AppError> {
    payload.validate()?;

    let produto = app_state
        .catalog_service
        .update_produto(claims.user_id()?, id, payload)
        .await?;
    Ok(Json(produto))
}

#[utoipa::path(
    delete,
    path = "/api/produto/{id}",
    tag = "Catalogo",
    params(("id" = Uuid, Path, description = "ID do Produto")),
    responses(
        (status = 200, description = "Produto excluído"),
        (status = 403, description = "Produto de outra empresa"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_produto(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_produto(claims.user_id()?, id)
        .await?;
    Ok(Json(json!({ "message": "Produto deletado com sucesso" })))
}
