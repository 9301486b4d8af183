// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::error::AppError,
    db::{
        CategoriaRepository, CategoriaStore, EmpresaRepository, EmpresaStore, ProdutoRepository,
        ProdutoStore, UserRepository, UserStore,
    },
    services::{
        auth::AuthService, catalog_service::CatalogService, empresa_service::EmpresaService,
        password_policy::PasswordPolicy, token::TokenIssuer,
    },
};

/// Configuração do processo, lida das variáveis de ambiente (e do `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub bcrypt_cost: u32,
    /// Quando definido, `create-admin` exige o cabeçalho `X-Admin-Bootstrap-Secret`.
    pub admin_bootstrap_secret: Option<String>,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET não pode ser vazio");
        }

        let db_max_connections = var_or("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS deve ser um número")?;
        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value.parse().context("BCRYPT_COST deve ser um número")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            database_url,
            db_max_connections,
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            jwt_secret,
            jwt_issuer: var_or("JWT_ISSUER", "ContaCerta"),
            jwt_audience: var_or("JWT_AUDIENCE", "ContaCertaUsers"),
            bcrypt_cost,
            admin_bootstrap_secret: env::var("ADMIN_BOOTSTRAP_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

/// As implementações de persistência que o estado usa.
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub empresas: Arc<dyn EmpresaStore>,
    pub categorias: Arc<dyn CategoriaStore>,
    pub produtos: Arc<dyn ProdutoStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            empresas: Arc::new(EmpresaRepository::new(pool.clone())),
            categorias: Arc::new(CategoriaRepository::new(pool.clone())),
            produtos: Arc::new(ProdutoRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub empresa_service: EmpresaService,
    pub catalog_service: CatalogService,
    pub admin_bootstrap_secret: Option<Arc<str>>,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn new(config: &Config, stores: Stores) -> Result<Self, AppError> {
        let tokens = TokenIssuer::new(&config.jwt_secret, &config.jwt_issuer, &config.jwt_audience);
        let auth_service = AuthService::new(
            stores.users,
            tokens,
            PasswordPolicy::default(),
            config.bcrypt_cost,
        )?;
        let empresa_service = EmpresaService::new(stores.empresas.clone());
        let catalog_service =
            CatalogService::new(stores.empresas, stores.categorias, stores.produtos);

        if config.admin_bootstrap_secret.is_none() {
            tracing::warn!("ADMIN_BOOTSTRAP_SECRET não definido: /api/auth/create-admin está aberto a qualquer chamador");
        }

        Ok(Self {
            auth_service,
            empresa_service,
            catalog_service,
            admin_bootstrap_secret: config.admin_bootstrap_secret.as_deref().map(Arc::from),
        })
    }
}
