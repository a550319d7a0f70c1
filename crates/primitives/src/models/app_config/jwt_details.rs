use eyre::Report;
use secrecy::SecretString;
use std::env;

/// Tokens are minted by the upstream identity service; this engine only
/// validates them, so the shared secret and expected claims are all we carry.
#[derive(Debug, Clone)]
pub struct JWTInfo {
    pub jwt_secret: SecretString,
    pub jwt_issuer: String,
    pub jwt_audience: String,
}

impl JWTInfo {
    pub fn new() -> Result<Self, Report> {
        let secret = env::var("JWT_SECRET")?;
        if secret.len() < 32 {
            return Err(eyre::eyre!("JWT_SECRET must be at least 32 characters"));
        }

        Ok(Self {
            jwt_secret: SecretString::new(Box::from(secret)),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "sawari".into()),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "sawari_api".into()),
        })
    }
}
