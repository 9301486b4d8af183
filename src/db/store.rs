// src/db/store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{Role, User},
        catalog::{Categoria, Produto},
        empresa::Empresa,
    },
};

/// Cadastro de identidades: usuários, senhas (já em hash) e papéis.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Busca sem diferenciar maiúsculas/minúsculas.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Falha com `AppError::EmailAlreadyExists` se o e-mail já estiver cadastrado.
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        email_confirmed: bool,
    ) -> Result<User, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<String>, AppError>;

    /// Devolve o papel, criando-o se ainda não existir. Nunca cria duplicado.
    async fn ensure_role(&self, name: &str) -> Result<Role, AppError>;

    async fn add_to_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError>;
}

/// Persistência de empresas. Todas as leituras ignoram linhas excluídas.
#[async_trait]
pub trait EmpresaStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Empresa>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Empresa>, AppError>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Empresa>, AppError>;

    /// Falha com `AppError::EmpresaAlreadyExists` se o dono já tiver uma empresa ativa.
    async fn insert(&self, empresa: &Empresa) -> Result<Empresa, AppError>;
    async fn update(&self, empresa: &Empresa) -> Result<Empresa, AppError>;

    /// `false` quando não existe linha ativa com esse id.
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError>;
    async fn exists(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CategoriaStore: Send + Sync {
    async fn find_by_empresa(&self, empresa_id: Uuid) -> Result<Vec<Categoria>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Categoria>, AppError>;
    async fn insert(&self, categoria: &Categoria) -> Result<Categoria, AppError>;
    async fn update(&self, categoria: &Categoria) -> Result<Categoria, AppError>;
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError>;

    /// Existe algum produto ativo apontando para esta categoria?
    async fn has_active_produtos(&self, categoria_id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ProdutoStore: Send + Sync {
    async fn find_by_empresa(
        &self,
        empresa_id: Uuid,
        categoria_id: Option<Uuid>,
    ) -> Result<Vec<Produto>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Produto>, AppError>;
    async fn insert(&self, produto: &Produto) -> Result<Produto, AppError>;
    async fn update(&self, produto: &Produto) -> Result<Produto, AppError>;
    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError>;
}
