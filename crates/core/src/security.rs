use crate::app_state::AppState;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sawari_primitives::error::ApiError;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: i64,    // expiration time
    pub iat: i64,    // issued at
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.sub).map_err(|e| {
            error!("Invalid user ID in claims: {}", e);
            ApiError::Auth("Invalid user ID in token".into())
        })
    }
}

pub struct SecurityConfig;

impl SecurityConfig {
    /// Tokens are normally minted by the identity service; this mirror of its
    /// signing logic backs the test fixtures and internal tooling.
    pub fn create_token(state: &AppState, user_id: &str) -> Result<String, ApiError> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(2)).timestamp(),
            iss: state.config.jwt_details.jwt_issuer.clone(),
            aud: state.config.jwt_details.jwt_audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(
                state
                    .config
                    .jwt_details
                    .jwt_secret
                    .expose_secret()
                    .as_bytes(),
            ),
        )
        .map_err(|e| {
            error!("JWT encoding error: {}", e);
            ApiError::Auth("Token creation failed".into())
        })
    }

    fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
        let auth_header = headers
            .get("Authorization")
            .ok_or_else(|| ApiError::Auth("Missing Authorization header".into()))?
            .to_str()
            .map_err(|_| ApiError::Auth("Invalid Authorization header".into()))?;

        auth_header
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or_else(|| ApiError::Auth("Authorization header must be a Bearer token".into()))
    }

    pub fn decode_token(state: &AppState, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&state.config.jwt_details.jwt_issuer]);
        validation.set_audience(&[&state.config.jwt_details.jwt_audience]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(
                state
                    .config
                    .jwt_details
                    .jwt_secret
                    .expose_secret()
                    .as_bytes(),
            ),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| ApiError::Auth(format!("Invalid token: {}", e)))
    }

    pub async fn auth_middleware(
        State(state): State<Arc<AppState>>,
        mut req: Request<axum::body::Body>,
        next: Next,
    ) -> Result<Response, ApiError> {
        let token = Self::extract_bearer_token(req.headers())?;
        let claims = Self::decode_token(&state, &token)?;

        req.extensions_mut().insert(claims);
        Ok(next.run(req).await)
    }
}
