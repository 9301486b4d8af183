// src/handlers/auth.rs

use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::WithRejection;
use subtle::ConstantTimeEq;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminRole, RequireRole},
    models::auth::{
        CreateAdminPayload, CreateAdminResponse, LoginResponse, LoginUserPayload,
        RegisterResponse, RegisterUserPayload, UserSummary,
    },
    services::auth::ADMIN_ROLE,
};

pub const ADMIN_BOOTSTRAP_HEADER: &str = "x-admin-bootstrap-secret";

// Comparação em tempo constante
fn bootstrap_secret_matches(presented: Option<&str>, expected: &str) -> bool {
    presented.is_some_and(|p| bool::from(p.as_bytes().ct_eq(expected.as_bytes())))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login realizado", body = LoginResponse),
        (status = 400, description = "Email ou senha inválidos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginUserPayload>, AppError>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let outcome = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login realizado com sucesso".to_string(),
        user_name: outcome.user.user_name,
        id: outcome.user.id,
        token: outcome.token,
    }))
}

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 200, description = "Usuário criado", body = RegisterResponse),
        (status = 400, description = "Dados inválidos, e-mail em uso ou senha fraca")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterUserPayload>, AppError>,
) -> Result<Json<RegisterResponse>, AppError> {
    payload.validate()?;

    let user = app_state
        .auth_service
        .register_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(RegisterResponse {
        message: "Usuário criado com sucesso".to_string(),
        user_id: user.id,
    }))
}

// Cria um administrador. Sem ADMIN_BOOTSTRAP_SECRET configurado, qualquer chamador anônimo pode usar.
#[utoipa::path(
    post,
    path = "/api/auth/create-admin",
    tag = "Auth",
    request_body = CreateAdminPayload,
    responses(
        (status = 200, description = "Administrador criado", body = CreateAdminResponse),
        (status = 400, description = "Usuário já existe ou dados inválidos"),
        (status = 403, description = "Segredo de bootstrap ausente ou incorreto")
    ),
    params(
        ("x-admin-bootstrap-secret" = Option<String>, Header, description = "Exigido apenas se configurado")
    )
)]
pub async fn create_admin(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(payload), _): WithRejection<Json<CreateAdminPayload>, AppError>,
) -> Result<Json<CreateAdminResponse>, AppError> {
    if let Some(expected) = &app_state.admin_bootstrap_secret {
        let presented = headers
            .get(ADMIN_BOOTSTRAP_HEADER)
            .and_then(|value| value.to_str().ok());
        if !bootstrap_secret_matches(presented, expected) {
            tracing::warn!("Tentativa de criar administrador sem o segredo de bootstrap");
            return Err(AppError::Forbidden);
        }
    }

    payload.validate()?;

    let user = app_state
        .auth_service
        .create_admin(&payload.email, &payload.password)
        .await?;

    Ok(Json(CreateAdminResponse {
        message: "Administrador criado com sucesso".to_string(),
        user_id: user.id,
        email: user.email,
        role: ADMIN_ROLE.to_string(),
    }))
}

// Lista todos os usuários (somente Admin, sem paginação)
#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "Auth",
    responses(
        (status = 200, description = "Todos os usuários", body = Vec<UserSummary>),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Requer o papel Admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = app_state.auth_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_secret_must_match_exactly() {
        assert!(bootstrap_secret_matches(Some("abre-te-sesamo"), "abre-te-sesamo"));
        assert!(!bootstrap_secret_matches(Some("abre-te-sesam"), "abre-te-sesamo"));
        assert!(!bootstrap_secret_matches(Some("abre-te-sesamo!"), "abre-te-sesamo"));
        assert!(!bootstrap_secret_matches(Some(""), "abre-te-sesamo"));
        assert!(!bootstrap_secret_matches(None, "abre-te-sesamo"));
    }
}
