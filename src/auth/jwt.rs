use axum::extract::FromRef;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::JwtConfig, state::AppState};

/// JWT payload. The subject is the user's email.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
}

/// HS256 signing keys for the token pair. Access and refresh tokens use
/// distinct secrets, so a refresh token never verifies as an access token.
#[derive(Clone)]
pub struct JwtKeys {
    access: EncodingKey,
    refresh: EncodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            access_secret,
            refresh_secret,
        } = state.config.jwt.clone();
        Self::new(&access_secret, &refresh_secret)
    }
}

impl JwtKeys {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access: EncodingKey::from_secret(access_secret.as_bytes()),
            refresh: EncodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }

    /// Sign an access/refresh pair for the given subject. Tokens carry no
    /// expiry claim; they stay valid until the secret changes.
    pub fn sign_pair(&self, email: &str) -> anyhow::Result<(String, String)> {
        let claims = Claims {
            sub: email.to_string(),
        };
        let access = encode(&Header::default(), &claims, &self.access)?;
        let refresh = encode(&Header::default(), &claims, &self.refresh)?;
        debug!(sub = %email, "token pair signed");
        Ok((access, refresh))
    }
}
