use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("Parâmetro de rota inválido: {0}")]
    MalformedPath(#[from] PathRejection),

    // Lista estruturada vinda do cadastro de identidade (e-mail duplicado, senha fraca...)
    #[error("Falha ao criar usuário: {0:?}")]
    IdentityErrors(Vec<String>),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Usuário já existe")]
    UserAlreadyExists,

    // Uma única mensagem para "e-mail não existe" e "senha errada"
    #[error("Email ou senha inválidos")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("ID do usuário inválido")]
    InvalidUserId,

    #[error("Empresa não encontrada")]
    EmpresaNotFound,

    #[error("Empresa não encontrada para este usuário")]
    EmpresaNotFoundForUser,

    #[error("Usuário já possui uma empresa cadastrada")]
    EmpresaAlreadyExists,

    #[error("Categoria não encontrada")]
    CategoriaNotFound,

    #[error("Categoria inválida para esta empresa")]
    InvalidCategoria,

    #[error("Categoria possui produtos vinculados")]
    CategoriaInUse,

    #[error("Produto não encontrado")]
    ProdutoNotFound,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MalformedBody(_)
            | AppError::MalformedPath(_)
            | AppError::IdentityErrors(_)
            | AppError::EmailAlreadyExists
            | AppError::UserAlreadyExists
            | AppError::InvalidCredentials
            | AppError::InvalidUserId
            | AppError::EmpresaAlreadyExists
            | AppError::InvalidCategoria
            | AppError::CategoriaInUse => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EmpresaNotFound
            | AppError::EmpresaNotFoundForUser
            | AppError::CategoriaNotFound
            | AppError::ProdutoNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Os erros de validação usam o nome do campo no Rust; o cliente fala camelCase.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            // Todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(camel_case(&field), messages);
                }
                json!({
                    "message": "Um ou mais campos são inválidos.",
                    "errors": details,
                })
            }
            AppError::MalformedBody(rejection) => json!({ "message": rejection.body_text() }),
            AppError::MalformedPath(rejection) => json!({ "message": rejection.body_text() }),
            AppError::IdentityErrors(errors) => json!({ "errors": errors }),

            // 500: o detalhe vai para o log, nunca para o cliente.
            ref e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                json!({ "message": "Erro interno do servidor" })
            }

            e => json!({ "message": e.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_credentials_is_a_plain_bad_request() {
        let (status, json) = body_of(AppError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "message": "Email ou senha inválidos" }));
    }

    #[tokio::test]
    async fn identity_errors_are_listed() {
        let (status, json) =
            body_of(AppError::IdentityErrors(vec!["a".into(), "b".into()])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"], json!(["a", "b"]));
    }

    #[tokio::test]
    async fn internal_errors_are_redacted() {
        let (status, json) =
            body_of(AppError::InternalServerError(anyhow::anyhow!("senha do banco: hunter2"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Erro interno do servidor");
        assert!(!json.to_string().contains("hunter2"));
    }

    #[test]
    fn field_names_become_camel_case() {
        assert_eq!(camel_case("confirm_password"), "confirmPassword");
        assert_eq!(camel_case("numero_registro"), "numeroRegistro");
        assert_eq!(camel_case("email"), "email");
    }

    #[tokio::test]
    async fn validation_errors_are_keyed_in_camel_case() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("tempo_preparo", validator::ValidationError::new("required"));
        let (status, json) = body_of(AppError::ValidationError(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["errors"].get("tempoPreparo").is_some());
        assert!(json["errors"].get("tempo_preparo").is_none());
    }

    #[tokio::test]
    async fn ownership_and_absence_map_to_distinct_statuses() {
        assert_eq!(body_of(AppError::Forbidden).await.0, StatusCode::FORBIDDEN);
        assert_eq!(body_of(AppError::EmpresaNotFound).await.0, StatusCode::NOT_FOUND);
    }
}
