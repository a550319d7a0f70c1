use axum::extract::{Extension, Json, State};
use sawari_core::services::payout_service::{
    ApiError, AppState, BatchPayoutRequest, BatchPayoutResponse, PayoutService,
};
use sawari_core::security::Claims;
use sawari_primitives::error::ApiErrorResponse;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/payouts/batch",
    tag = "Payouts",
    summary = "Trigger payouts for a batch of transactions",
    description = "Best-effort fan-out used by the settlement dashboard: every id gets its \
                   own success flag and failure message, one bad id never aborts the rest.",
    request_body = BatchPayoutRequest,
    responses(
        (status = 200, description = "Per-transaction outcomes", body = BatchPayoutResponse),
        (status = 400, description = "Empty or oversized batch", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn batch_payouts(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    Json(req): Json<BatchPayoutRequest>,
) -> Result<Json<BatchPayoutResponse>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::from(e)
    })?;

    let response = PayoutService::batch_trigger(&state, req).await;

    Ok(Json(response))
}
