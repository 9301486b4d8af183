// src/db/empresa_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{soft_delete, store::EmpresaStore},
    models::empresa::Empresa,
};

#[derive(Clone)]
pub struct EmpresaRepository {
    pool: PgPool,
}

impl EmpresaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// O índice único parcial `empresas_one_active_per_user` é quem fecha a corrida
// entre duas criações simultâneas para o mesmo dono.
fn map_owner_conflict(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::EmpresaAlreadyExists;
        }
    }
    e.into()
}

#[async_trait]
impl EmpresaStore for EmpresaRepository {
    async fn find_all(&self) -> Result<Vec<Empresa>, AppError> {
        soft_delete::find_all_active(&self.pool).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Empresa>, AppError> {
        soft_delete::find_active_by_id(&self.pool, id).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Empresa>, AppError> {
        let mut empresas = soft_delete::find_active_where::<Empresa>(&self.pool, "user_id", user_id).await?;
        Ok(if empresas.is_empty() { None } else { Some(empresas.swap_remove(0)) })
    }

    async fn insert(&self, empresa: &Empresa) -> Result<Empresa, AppError> {
        sqlx::query_as::<_, Empresa>(
            r#"
            INSERT INTO empresas
                (id, nome, numero_registro, email, telefone, cep, endereco, logo,
                 user_id, deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(empresa.id)
        .bind(&empresa.nome)
        .bind(empresa.numero_registro)
        .bind(&empresa.email)
        .bind(empresa.telefone)
        .bind(&empresa.cep)
        .bind(&empresa.endereco)
        .bind(&empresa.logo)
        .bind(empresa.user_id)
        .bind(empresa.deleted)
        .bind(empresa.created_at)
        .bind(empresa.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_owner_conflict)
    }

    async fn update(&self, empresa: &Empresa) -> Result<Empresa, AppError> {
        // id e user_id não fazem parte do SET
        sqlx::query_as::<_, Empresa>(
            r#"
            UPDATE empresas
            SET nome = $2, numero_registro = $3, email = $4, telefone = $5,
                cep = $6, endereco = $7, logo = $8, updated_at = $9
            WHERE id = $1 AND deleted = false
            RETURNING *
            "#,
        )
        .bind(empresa.id)
        .bind(&empresa.nome)
        .bind(empresa.numero_registro)
        .bind(&empresa.email)
        .bind(empresa.telefone)
        .bind(&empresa.cep)
        .bind(&empresa.endereco)
        .bind(&empresa.logo)
        .bind(empresa.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::EmpresaNotFound)
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        soft_delete::soft_delete::<Empresa>(&self.pool, id, at).await
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        soft_delete::exists_active::<Empresa>(&self.pool, id).await
    }
}
