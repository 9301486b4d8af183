// src/db/soft_delete.rs
//
// Consultas compartilhadas por todas as entidades `SoftDeletable`.
// O filtro `deleted = false` mora aqui e em nenhum outro lugar.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

use crate::{common::error::AppError, models::base::SoftDeletable};

pub async fn find_active_by_id<T>(pool: &PgPool, id: Uuid) -> Result<Option<T>, AppError>
where
    T: SoftDeletable + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!("SELECT * FROM {} WHERE id = $1 AND deleted = false", T::TABLE);
    let row = sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// `column` deve ser um nome de coluna fixo no código, nunca entrada do usuário.
pub async fn find_active_where<T>(
    pool: &PgPool,
    column: &'static str,
    value: Uuid,
) -> Result<Vec<T>, AppError>
where
    T: SoftDeletable + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!(
        "SELECT * FROM {} WHERE {} = $1 AND deleted = false ORDER BY created_at ASC",
        T::TABLE,
        column
    );
    let rows = sqlx::query_as::<_, T>(&sql)
        .bind(value)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all_active<T>(pool: &PgPool) -> Result<Vec<T>, AppError>
where
    T: SoftDeletable + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!(
        "SELECT * FROM {} WHERE deleted = false ORDER BY created_at ASC",
        T::TABLE
    );
    let rows = sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn exists_active<T: SoftDeletable>(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let sql = format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND deleted = false)",
        T::TABLE
    );
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;
    Ok(exists)
}

/// Liga a flag e renova `updated_at`. A linha continua no banco.
/// `false` se a linha não existe ou já estava excluída.
pub async fn soft_delete<T: SoftDeletable>(
    pool: &PgPool,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<bool, AppError> {
    let sql = format!(
        "UPDATE {} SET deleted = true, updated_at = $2 WHERE id = $1 AND deleted = false",
        T::TABLE
    );
    let result = sqlx::query(&sql).bind(id).bind(at).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
