// src/db/catalog_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        soft_delete,
        store::{CategoriaStore, ProdutoStore},
    },
    models::catalog::{Categoria, Produto},
};

// ---
// Categorias
// ---

#[derive(Clone)]
pub struct CategoriaRepository {
    pool: PgPool,
}

impl CategoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoriaStore for CategoriaRepository {
    async fn find_by_empresa(&self, empresa_id: Uuid) -> Result<Vec<Categoria>, AppError> {
        soft_delete::find_active_where(&self.pool, "empresa_id", empresa_id).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Categoria>, AppError> {
        soft_delete::find_active_by_id(&self.pool, id).await
    }

    async fn insert(&self, categoria: &Categoria) -> Result<Categoria, AppError> {
        let row = sqlx::query_as::<_, Categoria>(
            r#"
            INSERT INTO categorias (id, nome, tamanho, empresa_id, deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(categoria.id)
        .bind(&categoria.nome)
        .bind(&categoria.tamanho)
        .bind(categoria.empresa_id)
        .bind(categoria.deleted)
        .bind(categoria.created_at)
        .bind(categoria.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, categoria: &Categoria) -> Result<Categoria, AppError> {
        sqlx::query_as::<_, Categoria>(
            r#"
            UPDATE categorias
            SET nome = $2, tamanho = $3, updated_at = $4
            WHERE id = $1 AND deleted = false
            RETURNING *
            "#,
        )
        .bind(categoria.id)
        .bind(&categoria.nome)
        .bind(&categoria.tamanho)
        .bind(categoria.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::CategoriaNotFound)
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        soft_delete::soft_delete::<Categoria>(&self.pool, id, at).await
    }

    async fn has_active_produtos(&self, categoria_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM produtos WHERE categoria_id = $1 AND deleted = false)",
        )
        .bind(categoria_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

// ---
// Produtos
// ---

#[derive(Clone)]
pub struct ProdutoRepository {
    pool: PgPool,
}

impl ProdutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProdutoStore for ProdutoRepository {
    async fn find_by_empresa(
        &self,
        empresa_id: Uuid,
        categoria_id: Option<Uuid>,
    ) -> Result<Vec<Produto>, AppError> {
        let produtos = match categoria_id {
            Some(categoria_id) => {
                sqlx::query_as::<_, Produto>(
                    r#"
                    SELECT * FROM produtos
                    WHERE empresa_id = $1 AND categoria_id = $2 AND deleted = false
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(empresa_id)
                .bind(categoria_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => soft_delete::find_active_where(&self.pool, "empresa_id", empresa_id).await?,
        };
        Ok(produtos)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Produto>, AppError> {
        soft_delete::find_active_by_id(&self.pool, id).await
    }

    async fn insert(&self, produto: &Produto) -> Result<Produto, AppError> {
        let row = sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos
                (id, nome, descricao, preco, foto, tempo_preparo, avaliacao, desconto,
                 empresa_id, categoria_id, deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(produto.id)
        .bind(&produto.nome)
        .bind(&produto.descricao)
        .bind(produto.preco)
        .bind(&produto.foto)
        .bind(produto.tempo_preparo)
        .bind(produto.avaliacao)
        .bind(produto.desconto)
        .bind(produto.empresa_id)
        .bind(produto.categoria_id)
        .bind(produto.deleted)
        .bind(produto.created_at)
        .bind(produto.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, produto: &Produto) -> Result<Produto, AppError> {
        sqlx::query_as::<_, Produto>(
            r#"
            UPDATE produtos
            SET nome = $2, descricao = $3, preco = $4, foto = $5, tempo_preparo = $6,
                avaliacao = $7, desconto = $8, categoria_id = $9, updated_at = $10
            WHERE id = $1 AND deleted = false
            RETURNING *
            "#,
        )
        .bind(produto.id)
        .bind(&produto.nome)
        .bind(&produto.descricao)
        .bind(produto.preco)
        .bind(&produto.foto)
        .bind(produto.tempo_preparo)
        .bind(produto.avaliacao)
        .bind(produto.desconto)
        .bind(produto.categoria_id)
        .bind(produto.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ProdutoNotFound)
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        soft_delete::soft_delete::<Produto>(&self.pool, id, at).await
    }
}
