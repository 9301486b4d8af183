// src/services/catalog_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CategoriaStore, EmpresaStore, ProdutoStore},
    models::{
        catalog::{Categoria, CategoriaPayload, Produto, ProdutoPayload},
        empresa::Empresa,
    },
};

/// Categorias e produtos da empresa do usuário autenticado.
///
/// Toda operação começa resolvendo a empresa ativa do usuário. Um registro de outra empresa
/// responde 403, um registro inexistente (ou excluído) responde 404.
#[derive(Clone)]
pub struct CatalogService {
    empresas: Arc<dyn EmpresaStore>,
    categorias: Arc<dyn CategoriaStore>,
    produtos: Arc<dyn ProdutoStore>,
}

impl CatalogService {
    pub fn new(
        empresas: Arc<dyn EmpresaStore>,
        categorias: Arc<dyn CategoriaStore>,
        produtos: Arc<dyn ProdutoStore>,
    ) -> Self {
        Self { empresas, categorias, produtos }
    }

    async fn empresa_of(&self, user_id: Uuid) -> Result<Empresa, AppError> {
        self.empresas
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::EmpresaNotFoundForUser)
    }

    // ---
    // Categorias
    // ---

    pub async fn list_categorias(&self, user_id: Uuid) -> Result<Vec<Categoria>, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        self.categorias.find_by_empresa(empresa.id).await
    }

    pub async fn get_categoria(&self, user_id: Uuid, id: Uuid) -> Result<Categoria, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        self.owned_categoria(&empresa, id).await
    }

    pub async fn create_categoria(
        &self,
        user_id: Uuid,
        payload: CategoriaPayload,
    ) -> Result<Categoria, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        let categoria = Categoria::build(Uuid::new_v4(), empresa.id, payload);
        self.categorias.insert(&categoria).await
    }

    pub async fn update_categoria(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: CategoriaPayload,
    ) -> Result<Categoria, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        let mut categoria = self.owned_categoria(&empresa, id).await?;

        categoria.nome = payload.nome;
        categoria.tamanho = payload.tamanho;
        categoria.updated_at = Utc::now();

        self.categorias.update(&categoria).await
    }

    /// Categoria com produtos ativos não pode ser excluída.
    pub async fn delete_categoria(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let empresa = self.empresa_of(user_id).await?;
        let categoria = self.owned_categoria(&empresa, id).await?;

        if self.categorias.has_active_produtos(categoria.id).await? {
            return Err(AppError::CategoriaInUse);
        }

        if !self.categorias.soft_delete(categoria.id, Utc::now()).await? {
            return Err(AppError::CategoriaNotFound);
        }
        Ok(())
    }

    async fn owned_categoria(&self, empresa: &Empresa, id: Uuid) -> Result<Categoria, AppError> {
        let categoria = self
            .categorias
            .find_by_id(id)
            .await?
            .ok_or(AppError::CategoriaNotFound)?;

        if categoria.empresa_id != empresa.id {
            tracing::warn!(categoria_id = %id, empresa_id = %empresa.id, "Acesso a categoria de outra empresa");
            return Err(AppError::Forbidden);
        }
        Ok(categoria)
    }

    // ---
    // Produtos
    // ---

    pub async fn list_produtos(
        &self,
        user_id: Uuid,
        categoria_id: Option<Uuid>,
    ) -> Result<Vec<Produto>, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        self.produtos.find_by_empresa(empresa.id, categoria_id).await
    }

    pub async fn get_produto(&self, user_id: Uuid, id: Uuid) -> Result<Produto, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        self.owned_produto(&empresa, id).await
    }

    pub async fn create_produto(
        &self,
        user_id: Uuid,
        payload: ProdutoPayload,
    ) -> Result<Produto, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        self.check_categoria(&empresa, payload.categoria_id).await?;

        let produto = Produto::build(Uuid::new_v4(), empresa.id, payload);
        self.produtos.insert(&produto).await
    }

    pub async fn update_produto(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: ProdutoPayload,
    ) -> Result<Produto, AppError> {
        let empresa = self.empresa_of(user_id).await?;
        let existing = self.owned_produto(&empresa, id).await?;
        self.check_categoria(&empresa, payload.categoria_id).await?;

        // Reconstrói a entidade inteira; empresa e datas de criação vêm do registro gravado
        let mut produto = Produto::build(existing.id, existing.empresa_id, payload);
        produto.created_at = existing.created_at;
        produto.updated_at = Utc::now();

        self.produtos.update(&produto).await
    }

    pub async fn delete_produto(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let empresa = self.empresa_of(user_id).await?;
        let produto = self.owned_produto(&empresa, id).await?;

        if !self.produtos.soft_delete(produto.id, Utc::now()).await? {
            return Err(AppError::ProdutoNotFound);
        }
        Ok(())
    }

    async fn owned_produto(&self, empresa: &Empresa, id: Uuid) -> Result<Produto, AppError> {
        let produto = self
            .produtos
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProdutoNotFound)?;

        if produto.empresa_id != empresa.id {
            tracing::warn!(produto_id = %id, empresa_id = %empresa.id, "Acesso a produto de outra empresa");
            return Err(AppError::Forbidden);
        }
        Ok(produto)
    }

    // O produto só pode apontar para uma categoria ativa da mesma empresa
    async fn check_categoria(&self, empresa: &Empresa, categoria_id: Uuid) -> Result<(), AppError> {
        match self.categorias.find_by_id(categoria_id).await? {
            Some(categoria) if categoria.empresa_id == empresa.id => Ok(()),
            _ => Err(AppError::InvalidCategoria),
        }
    }
}
