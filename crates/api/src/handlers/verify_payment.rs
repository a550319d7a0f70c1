use axum::extract::{Extension, Json, State};
use sawari_core::services::verification_service::{
    ApiError, AppState, Claims, VerificationService, VerifyPaymentRequest, VerifyPaymentResponse,
};
use sawari_primitives::error::ApiErrorResponse;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/payments/verify",
    tag = "Payments",
    summary = "Verify a completed checkout",
    description = "Client-callback half of the capture race. Checks the checkout signature, \
                   fetches the authoritative payment record from the gateway and runs the \
                   shared capture transition. The webhook ingestor may already have captured \
                   the transaction; that case is a successful no-op.",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified and captured", body = VerifyPaymentResponse),
        (status = 400, description = "Invalid input or forged signature", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 402, description = "Gateway reports the payment unsuccessful", body = ApiErrorResponse),
        (status = 403, description = "Transaction belongs to another passenger", body = ApiErrorResponse),
        (status = 404, description = "Transaction not found", body = ApiErrorResponse),
        (status = 502, description = "Gateway unreachable, retry later", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let passenger_id = claims.user_id()?;

    let response = VerificationService::verify_payment(&state, passenger_id, req).await?;

    Ok(Json(response))
}
