// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::base::SoftDeletable;

// ---
// 1. Categoria
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: Uuid,
    #[schema(example = "Bebidas")]
    pub nome: String,
    #[schema(example = "Grande")]
    pub tamanho: String,
    pub empresa_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SoftDeletable for Categoria {
    const TABLE: &'static str = "categorias";
}

// ---
// 2. Produto
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: Uuid,
    pub nome: String,
    pub descricao: String,
    /// Preço em centavos
    #[schema(example = 1590)]
    pub preco: i32,
    pub foto: Option<String>,
    pub tempo_preparo: DateTime<Utc>,
    #[schema(minimum = 0, maximum = 5)]
    pub avaliacao: i32,
    #[schema(minimum = 0, maximum = 100)]
    pub desconto: i32,
    pub empresa_id: Uuid,
    pub categoria_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SoftDeletable for Produto {
    const TABLE: &'static str = "produtos";
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaPayload {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."))]
    pub nome: String,

    #[validate(length(min = 1, max = 50, message = "O tamanho deve ter entre 1 e 50 caracteres."))]
    pub tamanho: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoPayload {
    #[validate(length(min = 1, max = 200, message = "O nome deve ter entre 1 e 200 caracteres."))]
    pub nome: String,

    #[validate(length(min = 1, max = 1000, message = "A descrição deve ter entre 1 e 1000 caracteres."))]
    pub descricao: String,

    #[validate(range(min = 0, message = "O preço não pode ser negativo."))]
    pub preco: i32,

    #[validate(length(max = 5000000, message = "A foto excede o tamanho máximo permitido."))]
    pub foto: Option<String>,

    pub tempo_preparo: DateTime<Utc>,

    #[validate(range(min = 0, max = 5, message = "A avaliação deve estar entre 0 e 5."))]
    pub avaliacao: i32,

    #[validate(range(min = 0, max = 100, message = "O desconto deve estar entre 0 e 100."))]
    pub desconto: i32,

    pub categoria_id: Uuid,
}

// Filtro opcional da listagem de produtos
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProdutoFilter {
    pub categoria_id: Option<Uuid>,
}

impl Categoria {
    pub fn build(id: Uuid, empresa_id: Uuid, payload: CategoriaPayload) -> Self {
        let now = Utc::now();
        Self {
            id,
            nome: payload.nome,
            tamanho: payload.tamanho,
            empresa_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Produto {
    pub fn build(id: Uuid, empresa_id: Uuid, payload: ProdutoPayload) -> Self {
        let now = Utc::now();
        Self {
            id,
            nome: payload.nome,
            descricao: payload.descricao,
            preco: payload.preco,
            foto: payload.foto,
            tempo_preparo: payload.tempo_preparo,
            avaliacao: payload.avaliacao,
            desconto: payload.desconto,
            empresa_id,
            categoria_id: payload.categoria_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produto_payload() -> ProdutoPayload {
        ProdutoPayload {
            nome: "Pão de queijo".into(),
            descricao: "Tradicional".into(),
            preco: 500,
            foto: None,
            tempo_preparo: Utc::now(),
            avaliacao: 5,
            desconto: 0,
            categoria_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn produto_rating_and_discount_are_bounded() {
        let mut p = produto_payload();
        p.avaliacao = 6;
        p.desconto = 101;
        p.preco = -1;
        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("avaliacao"));
        assert!(fields.contains_key("desconto"));
        assert!(fields.contains_key("preco"));
    }

    #[test]
    fn produto_payload_bounds_are_inclusive() {
        let mut p = produto_payload();
        p.avaliacao = 0;
        p.desconto = 100;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn categoria_tamanho_is_limited() {
        let payload = CategoriaPayload {
            nome: "Bebidas".into(),
            tamanho: "x".repeat(51),
        };
        assert!(payload.validate().unwrap_err().field_errors().contains_key("tamanho"));
    }
}
