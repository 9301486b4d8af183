// src/services/empresa_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{common::error::AppError, db::EmpresaStore, models::empresa::Empresa};

#[derive(Clone)]
pub struct EmpresaService {
    empresas: Arc<dyn EmpresaStore>,
}

impl EmpresaService {
    pub fn new(empresas: Arc<dyn EmpresaStore>) -> Self {
        Self { empresas }
    }

    pub async fn get_all(&self) -> Result<Vec<Empresa>, AppError> {
        self.empresas.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Empresa>, AppError> {
        self.empresas.find_by_id(id).await
    }

    pub async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Empresa>, AppError> {
        self.empresas.find_by_user_id(user_id).await
    }

    /// Carimba as datas e persiste como não excluída.
    pub async fn create(&self, mut empresa: Empresa) -> Result<Empresa, AppError> {
        let now = Utc::now();
        empresa.created_at = now;
        empresa.updated_at = now;
        empresa.deleted = false;

        let created = self.empresas.insert(&empresa).await?;
        tracing::info!(empresa_id = %created.id, user_id = %created.user_id, "Empresa criada");
        Ok(created)
    }

    /// Sobrescreve os campos editáveis da empresa existente.
    /// `id`, `user_id` e `created_at` sempre vêm da linha gravada, nunca do argumento.
    pub async fn update(&self, empresa: Empresa) -> Result<Empresa, AppError> {
        let mut existing = self
            .empresas
            .find_by_id(empresa.id)
            .await?
            .ok_or(AppError::EmpresaNotFound)?;

        existing.nome = empresa.nome;
        existing.numero_registro = empresa.numero_registro;
        existing.email = empresa.email;
        existing.telefone = empresa.telefone;
        existing.cep = empresa.cep;
        existing.endereco = empresa.endereco;
        existing.logo = empresa.logo;
        existing.updated_at = Utc::now();

        self.empresas.update(&existing).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let deleted = self.empresas.soft_delete(id, Utc::now()).await?;
        if deleted {
            tracing::info!(empresa_id = %id, "Empresa marcada como excluída");
        }
        Ok(deleted)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        self.empresas.exists(id).await
    }
}
