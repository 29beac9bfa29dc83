use serde::Deserialize;

/// Secrets for the access/refresh token pair. The two tokens are signed
/// with distinct keys so one cannot stand in for the other.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            access_secret: std::env::var("JWT_ACCESS_SECRET")?,
            refresh_secret: std::env::var("JWT_REFRESH_SECRET")?,
        };
        Ok(Self { database_url, jwt })
    }
}
