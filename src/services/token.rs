// src/services/token.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Claims, User},
};

/// Tokens valem 2 horas e não existe renovação.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// Emite e valida os JWT (HS256) da aplicação.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
        }
    }

    pub fn issue(&self, user: &User, roles: &[String]) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            roles: roles.to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "dono@padaria.com".into(),
            user_name: "dono@padaria.com".into(),
            password_hash: String::new(),
            email_confirmed: true,
            created_at: Utc::now(),
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("segredo-de-teste-bem-comprido", "ContaCerta", "ContaCertaUsers")
    }

    #[test]
    fn issued_token_round_trips_identity_and_roles() {
        let user = user();
        let issuer = issuer();
        let token = issuer.issue(&user, &["Admin".to_string()]).unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert!(claims.has_role("Admin"));
        assert_eq!(claims.exp - claims.iat, (TOKEN_TTL_HOURS * 3600) as usize);
    }

    #[test]
    fn every_token_gets_a_fresh_jti() {
        let user = user();
        let issuer = issuer();
        let a = issuer.validate(&issuer.issue(&user, &[]).unwrap()).unwrap();
        let b = issuer.validate(&issuer.issue(&user, &[]).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn rejects_token_from_other_key_or_audience() {
        let user = user();
        let token = issuer().issue(&user, &[]).unwrap();

        let other_key = TokenIssuer::new("outro-segredo", "ContaCerta", "ContaCertaUsers");
        assert!(matches!(other_key.validate(&token), Err(AppError::InvalidToken)));

        let other_aud = TokenIssuer::new("segredo-de-teste-bem-comprido", "ContaCerta", "Outros");
        assert!(matches!(other_aud.validate(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn rejects_expired_token() {
        let issuer = issuer();
        let past = (Utc::now() - Duration::hours(3)).timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "x@y.com".into(),
            jti: Uuid::new_v4().to_string(),
            roles: vec![],
            iss: "ContaCerta".into(),
            aud: "ContaCertaUsers".into(),
            exp: past,
            iat: past,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"segredo-de-teste-bem-comprido"),
        )
        .unwrap();
        assert!(matches!(issuer.validate(&token), Err(AppError::InvalidToken)));
    }
}
