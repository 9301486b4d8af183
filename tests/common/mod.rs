#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use contacerta::{
    common::error::AppError,
    config::{AppState, Config, Stores},
    db::{CategoriaStore, EmpresaStore, ProdutoStore, UserStore},
    models::{
        auth::{Role, User},
        catalog::{Categoria, Produto},
        empresa::Empresa,
    },
};

pub const JWT_SECRET: &str = "segredo-de-teste-com-tamanho-suficiente";
pub const PASSWORD: &str = "Senha@123";

// ---
// Tabela em memória com a mesma regra de exclusão lógica do Postgres
// ---

/// O que a tabela em memória precisa saber de cada linha.
pub trait MemRow {
    fn id(&self) -> Uuid;
    fn is_deleted(&self) -> bool;
    fn mark_deleted(&mut self, at: DateTime<Utc>);
}

macro_rules! mem_row {
    ($($ty:ty),*) => {$(
        impl MemRow for $ty {
            fn id(&self) -> Uuid {
                self.id
            }

            fn is_deleted(&self) -> bool {
                self.deleted
            }

            fn mark_deleted(&mut self, at: DateTime<Utc>) {
                self.deleted = true;
                self.updated_at = at;
            }
        }
    )*};
}

mem_row!(Empresa, Categoria, Produto);

pub struct MemTable<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for MemTable<T> {
    fn default() -> Self {
        Self { rows: Mutex::new(Vec::new()) }
    }
}

impl<T: MemRow + Clone> MemTable<T> {
    pub fn active(&self) -> Vec<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| !row.is_deleted())
            .cloned()
            .collect()
    }

    pub fn find_active(&self, id: Uuid) -> Option<T> {
        self.active().into_iter().find(|row| row.id() == id)
    }

    /// Inclui linhas excluídas.
    pub fn raw(&self, id: Uuid) -> Option<T> {
        self.rows.lock().unwrap().iter().find(|row| row.id() == id).cloned()
    }

    fn push(&self, row: T) -> T {
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    fn replace_active(&self, row: &T) -> Option<T> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|existing| existing.id() == row.id() && !existing.is_deleted())?;
        *slot = row.clone();
        Some(row.clone())
    }

    fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> bool {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.id() == id && !row.is_deleted()) {
            Some(row) => {
                row.mark_deleted(at);
                true
            }
            None => false,
        }
    }
}

// ---
// Um único objeto implementa todos os stores
// ---

#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<Vec<User>>,
    pub roles: Mutex<Vec<Role>>,
    pub user_roles: Mutex<Vec<(Uuid, Uuid)>>,
    pub empresas: MemTable<Empresa>,
    pub categorias: MemTable<Categoria>,
    pub produtos: MemTable<Produto>,
}

impl MemoryStore {
    pub fn role_count(&self, name: &str) -> usize {
        self.roles.lock().unwrap().iter().filter(|r| r.name == name).count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        email_confirmed: bool,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::EmailAlreadyExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            user_name: email.to_string(),
            password_hash: password_hash.to_string(),
            email_confirmed,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let links = self.user_roles.lock().unwrap();
        let roles = self.roles.lock().unwrap();
        Ok(links
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, r)| roles.iter().find(|role| role.id == *r))
            .map(|role| role.name.clone())
            .collect())
    }

    async fn ensure_role(&self, name: &str) -> Result<Role, AppError> {
        let mut roles = self.roles.lock().unwrap();
        if let Some(role) = roles.iter().find(|r| r.name == name) {
            return Ok(role.clone());
        }
        let role = Role { id: Uuid::new_v4(), name: name.to_string() };
        roles.push(role.clone());
        Ok(role)
    }

    async fn add_to_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError> {
        let mut links = self.user_roles.lock().unwrap();
        if !links.contains(&(user_id, role_id)) {
            links.push((user_id, role_id));
        }
        Ok(())
    }
}

#[async_trait]
impl EmpresaStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Empresa>, AppError> {
        Ok(self.empresas.active())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Empresa>, AppError> {
        Ok(self.empresas.find_active(id))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Empresa>, AppError> {
        Ok(self.empresas.active().into_iter().find(|e| e.user_id == user_id))
    }

    async fn insert(&self, empresa: &Empresa) -> Result<Empresa, AppError> {
        // Mesmo papel do índice único parcial no Postgres
        if self.empresas.active().iter().any(|e| e.user_id == empresa.user_id) {
            return Err(AppError::EmpresaAlreadyExists);
        }
        Ok(self.empresas.push(empresa.clone()))
    }

    async fn update(&self, empresa: &Empresa) -> Result<Empresa, AppError> {
        self.empresas.replace_active(empresa).ok_or(AppError::EmpresaNotFound)
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        Ok(self.empresas.soft_delete(id, at))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.empresas.find_active(id).is_some())
    }
}

#[async_trait]
impl CategoriaStore for MemoryStore {
    async fn find_by_empresa(&self, empresa_id: Uuid) -> Result<Vec<Categoria>, AppError> {
        Ok(self
            .categorias
            .active()
            .into_iter()
            .filter(|c| c.empresa_id == empresa_id)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Categoria>, AppError> {
        Ok(self.categorias.find_active(id))
    }

    async fn insert(&self, categoria: &Categoria) -> Result<Categoria, AppError> {
        Ok(self.categorias.push(categoria.clone()))
    }

    async fn update(&self, categoria: &Categoria) -> Result<Categoria, AppError> {
        self.categorias.replace_active(categoria).ok_or(AppError::CategoriaNotFound)
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        Ok(self.categorias.soft_delete(id, at))
    }

    async fn has_active_produtos(&self, categoria_id: Uuid) -> Result<bool, AppError> {
        Ok(self.produtos.active().iter().any(|p| p.categoria_id == categoria_id))
    }
}

#[async_trait]
impl ProdutoStore for MemoryStore {
    async fn find_by_empresa(
        &self,
        empresa_id: Uuid,
        categoria_id: Option<Uuid>,
    ) -> Result<Vec<Produto>, AppError> {
        Ok(self
            .produtos
            .active()
            .into_iter()
            .filter(|p| p.empresa_id == empresa_id)
            .filter(|p| categoria_id.is_none_or(|c| p.categoria_id == c))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Produto>, AppError> {
        Ok(self.produtos.find_active(id))
    }

    async fn insert(&self, produto: &Produto) -> Result<Produto, AppError> {
        Ok(self.produtos.push(produto.clone()))
    }

    async fn update(&self, produto: &Produto) -> Result<Produto, AppError> {
        self.produtos.replace_active(produto).ok_or(AppError::ProdutoNotFound)
    }

    async fn soft_delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        Ok(self.produtos.soft_delete(id, at))
    }
}

// ---
// Aplicação de teste
// ---

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        db_max_connections: 1,
        bind_addr: "127.0.0.1:0".into(),
        jwt_secret: JWT_SECRET.into(),
        jwt_issuer: "ContaCerta".into(),
        jwt_audience: "ContaCertaUsers".into(),
        bcrypt_cost: 4,
        admin_bootstrap_secret: None,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: Config) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let stores = Stores {
        users: store.clone(),
        empresas: store.clone(),
        categorias: store.clone(),
        produtos: store.clone(),
    };
    let state = AppState::new(&config, stores).expect("estado de teste");
    TestApp { router: contacerta::app(state.clone()), store, state }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.request_with_headers(method, uri, token, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn register(&self, email: &str) -> Uuid {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "email": email, "password": PASSWORD, "confirmPassword": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["userId"].as_str().unwrap().parse().unwrap()
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Registra, faz login e devolve (token, id do usuário).
    pub async fn user(&self, email: &str) -> (String, Uuid) {
        let id = self.register(email).await;
        (self.login(email).await, id)
    }

    pub async fn create_empresa(&self, token: &str, nome: &str) -> Value {
        let (status, body) = self
            .request(Method::POST, "/api/empresa", Some(token), Some(empresa_body(nome)))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

pub fn empresa_body(nome: &str) -> Value {
    json!({
        "nome": nome,
        "numeroRegistro": 12345678000199_i64,
        "email": "contato@empresa.com.br",
        "telefone": 11987654321_i64,
        "cep": "01001-000",
        "endereco": "Praça da Sé, 1 - São Paulo",
        "logo": null
    })
}
