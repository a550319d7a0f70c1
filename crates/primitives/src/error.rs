use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    Forbidden(String),
    Conflict(String),
    SignatureMismatch(String),
    Payment(String),
    Gateway(String),
    Auth(String),
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Internal(String),
}

/// Wire body for every failed synchronous endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::SignatureMismatch(_) => "SIGNATURE_MISMATCH",
            ApiError::Payment(_) => "PAYMENT_NOT_SUCCESSFUL",
            ApiError::Gateway(_) => "GATEWAY_UNAVAILABLE",
            ApiError::Auth(_) => "UNAUTHORIZED",
            ApiError::Database(_) | ApiError::DatabaseConnection(_) | ApiError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::Forbidden(e) => write!(f, "Forbidden: {}", e),
            ApiError::Conflict(e) => write!(f, "Conflict: {}", e),
            ApiError::SignatureMismatch(e) => write!(f, "Signature mismatch: {}", e),
            ApiError::Payment(e) => write!(f, "Payment error: {}", e),
            ApiError::Gateway(e) => write!(f, "Gateway error: {}", e),
            ApiError::Auth(e) => write!(f, "Authentication error: {}", e),
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<ApiError> for (StatusCode, ApiErrorResponse) {
    fn from(err: ApiError) -> Self {
        let code = err.error_code().to_string();
        let status = match &err {
            ApiError::Validation(_) | ApiError::SignatureMismatch(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Payment(_) => StatusCode::PAYMENT_REQUIRED,
            ApiError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::DatabaseConnection(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal detail stays in the logs, not on the wire.
        let message = match &err {
            ApiError::Database(_) | ApiError::DatabaseConnection(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            ApiErrorResponse {
                success: false,
                message,
                error_code: Some(code),
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body): (StatusCode, ApiErrorResponse) = self.into();
        (status, Json(body)).into_response()
    }
}
