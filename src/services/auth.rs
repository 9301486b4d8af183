// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::{
    common::error::AppError,
    db::UserStore,
    models::auth::{Claims, User},
    services::{password_policy::PasswordPolicy, token::TokenIssuer},
};

pub const ADMIN_ROLE: &str = "Admin";

// Resultado de um login bem-sucedido
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
    policy: PasswordPolicy,
    bcrypt_cost: u32,
    // Verificado quando o e-mail não existe, para o login custar o mesmo nos dois caminhos
    dummy_hash: Arc<str>,
}

fn duplicate_email_message(email: &str) -> String {
    format!("O e-mail '{}' já está em uso.", email)
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: TokenIssuer,
        policy: PasswordPolicy,
        bcrypt_cost: u32,
    ) -> Result<Self, AppError> {
        let dummy_hash = hash("senha-que-nunca-confere", bcrypt_cost)?;
        Ok(Self {
            users,
            tokens,
            policy,
            bcrypt_cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self.users.find_by_email(email).await?;

        let password_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let is_password_valid = self.verify_password(password, password_hash).await?;

        // Mesma resposta para "e-mail não existe" e "senha errada"
        let user = match user {
            Some(user) if is_password_valid => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        let roles = self.users.roles_for_user(user.id).await?;
        let token = self.tokens.issue(&user, &roles)?;

        tracing::info!(user_id = %user.id, "Login realizado");
        Ok(LoginOutcome { user, token })
    }

    pub async fn register_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.create_identity(email, password).await?;
        tracing::info!(user_id = %user.id, "Novo usuário registrado");
        Ok(user)
    }

    /// Cria um usuário e o coloca no papel "Admin".
    ///
    /// Criação e atribuição do papel são duas chamadas separadas ao cadastro: se o processo
    /// cair entre elas, o usuário fica sem papel.
    pub async fn create_admin(&self, email: &str, password: &str) -> Result<User, AppError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::UserAlreadyExists);
        }

        let user = self.create_identity(email, password).await?;

        let role = self.users.ensure_role(ADMIN_ROLE).await?;
        self.users.add_to_role(user.id, role.id).await?;

        tracing::info!(user_id = %user.id, role = ADMIN_ROLE, "Administrador criado");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list_users().await
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        self.tokens.validate(token)
    }

    // Duplicidade e política de senha são reportadas juntas, como uma lista.
    async fn create_identity(&self, email: &str, password: &str) -> Result<User, AppError> {
        let mut errors = Vec::new();
        if self.users.find_by_email(email).await?.is_some() {
            errors.push(duplicate_email_message(email));
        }
        errors.extend(self.policy.check(password));
        if !errors.is_empty() {
            return Err(AppError::IdentityErrors(errors));
        }

        let hashed_password = self.hash_password(password).await?;

        // Ambiente de testes: e-mail já nasce confirmado
        self.users
            .create_user(email, &hashed_password, true)
            .await
            .map_err(|e| match e {
                AppError::EmailAlreadyExists => {
                    AppError::IdentityErrors(vec![duplicate_email_message(email)])
                }
                other => other,
            })
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    async fn verify_password(&self, password: &str, password_hash: String) -> Result<bool, AppError> {
        let password_clone = password.to_owned();

        // Executa a verificação em um thread separado
        let is_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(is_valid)
    }
}
