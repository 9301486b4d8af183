// src/models/empresa.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::base::SoftDeletable;

// ---
// Empresa (a "Loja" de um usuário)
// ---
// Cada usuário é dono de no máximo uma empresa não excluída.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    pub id: Uuid,
    #[schema(example = "Padaria Pão Quente")]
    pub nome: String,
    pub numero_registro: i64,
    #[schema(example = "contato@paoquente.com.br")]
    pub email: String,
    pub telefone: i64,
    #[schema(example = "01001-000")]
    pub cep: String,
    pub endereco: String,
    /// Imagem em base64 (opaca para o backend)
    pub logo: Option<String>,
    pub user_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SoftDeletable for Empresa {
    const TABLE: &'static str = "empresas";
}

/// Os campos que o dono pode alterar.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpresaData {
    pub nome: String,
    pub numero_registro: i64,
    pub email: String,
    pub telefone: i64,
    pub cep: String,
    pub endereco: String,
    pub logo: Option<String>,
}

impl Empresa {
    /// Monta a entidade inteira a partir do formulário e do dono.
    /// As datas são provisórias: o serviço carimba na criação e a atualização preserva as originais.
    pub fn build(id: Uuid, user_id: Uuid, data: EmpresaData) -> Self {
        let now = Utc::now();
        Self {
            id,
            nome: data.nome,
            numero_registro: data.numero_registro,
            email: data.email,
            telefone: data.telefone,
            cep: data.cep,
            endereco: data.endereco,
            logo: data.logo,
            user_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

// ---
// Payload de criação/atualização
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaPayload {
    #[validate(length(min = 1, max = 200, message = "O nome deve ter entre 1 e 200 caracteres."))]
    pub nome: String,

    pub numero_registro: i64,

    #[validate(
        email(message = "O e-mail fornecido é inválido."),
        length(max = 100, message = "O e-mail deve ter no máximo 100 caracteres.")
    )]
    pub email: String,

    pub telefone: i64,

    #[validate(length(min = 1, max = 10, message = "O CEP deve ter entre 1 e 10 caracteres."))]
    pub cep: String,

    #[validate(length(min = 1, max = 500, message = "O endereço deve ter entre 1 e 500 caracteres."))]
    pub endereco: String,

    #[validate(length(max = 5000000, message = "O logo excede o tamanho máximo permitido."))]
    pub logo: Option<String>,
}

impl From<EmpresaPayload> for EmpresaData {
    fn from(payload: EmpresaPayload) -> Self {
        Self {
            nome: payload.nome,
            numero_registro: payload.numero_registro,
            email: payload.email,
            telefone: payload.telefone,
            cep: payload.cep,
            endereco: payload.endereco,
            logo: payload.logo,
        }
    }
}
