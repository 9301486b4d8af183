// src/handlers/empresa.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
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
    models::empresa::{Empresa, EmpresaPayload},
};

// ---
// Verificação de dono
// ---
// 404 se não existe, 403 se existe mas é de outro usuário.
// A diferença entre os dois status confirma a existência para quem não é dono.
async fn load_owned_empresa(
    app_state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> Result<Empresa, AppError> {
    let empresa = app_state
        .empresa_service
        .get_by_id(id)
        .await?
        .ok_or(AppError::EmpresaNotFound)?;

    if empresa.user_id != user_id {
        tracing::warn!(empresa_id = %id, user_id = %user_id, "Usuário não é dono da empresa");
        return Err(AppError::Forbidden);
    }
    Ok(empresa)
}

#[utoipa::path(
    get,
    path = "/api/empresa",
    tag = "Empresa",
    responses(
        (status = 200, description = "Empresas ativas", body = Vec<Empresa>),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_empresas(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Empresa>>, AppError> {
    let empresas = app_state.empresa_service.get_all().await?;
    Ok(Json(empresas))
}

#[utoipa::path(
    get,
    path = "/api/empresa/{id}",
    tag = "Empresa",
    params(("id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Empresa encontrada", body = Empresa),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_empresa(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Empresa>, AppError> {
    let empresa = app_state
        .empresa_service
        .get_by_id(id)
        .await?
        .ok_or(AppError::EmpresaNotFound)?;
    Ok(Json(empresa))
}

#[utoipa::path(
    get,
    path = "/api/empresa/my-empresa",
    tag = "Empresa",
    responses(
        (status = 200, description = "Empresa do usuário autenticado", body = Empresa),
        (status = 400, description = "ID do usuário inválido no token"),
        (status = 404, description = "Usuário ainda não tem empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_empresa(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<Empresa>, AppError> {
    let user_id = claims.user_id()?;

    let empresa = app_state
        .empresa_service
        .get_by_user_id(user_id)
        .await?
        .ok_or(AppError::EmpresaNotFoundForUser)?;
    Ok(Json(empresa))
}

#[utoipa::path(
    post,
    path = "/api/empresa",
    tag = "Empresa",
    request_body = EmpresaPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Empresa),
        (status = 400, description = "Dados inválidos ou usuário já possui empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_empresa(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<EmpresaPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let user_id = claims.user_id()?;

    // Uma empresa ativa por usuário
    if app_state.empresa_service.get_by_user_id(user_id).await?.is_some() {
        return Err(AppError::EmpresaAlreadyExists);
    }

    let empresa = Empresa::build(Uuid::new_v4(), user_id, payload.into());
    let created = app_state.empresa_service.create(empresa).await?;

    let location = format!("/api/empresa/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/empresa/{id}",
    tag = "Empresa",
    request_body = EmpresaPayload,
    params(("id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Empresa atualizada", body = Empresa),
        (status = 403, description = "Usuário não é o dono"),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_empresa(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<EmpresaPayload>, AppError>,
) -> Result<Json<Empresa>, AppError> {
    payload.validate()?;
    let user_id = claims.user_id()?;

    load_owned_empresa(&app_state, id, user_id).await?;

    // Entidade inteira reconstruída: o dono é sempre quem chama, nunca o corpo da requisição
    let empresa = Empresa::build(id, user_id, payload.into());
    let updated = app_state.empresa_service.update(empresa).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/empresa/{id}",
    tag = "Empresa",
    params(("id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Empresa excluída"),
        (status = 403, description = "Usuário não é o dono"),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_empresa(
    State(app_state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    load_owned_empresa(&app_state, id, user_id).await?;

    if !app_state.empresa_service.delete(id).await? {
        return Err(AppError::EmpresaNotFound);
    }

    Ok(Json(json!({ "message": "Empresa deletada com sucesso" })))
}
