use axum::extract::{Extension, Path, State};
use axum::Json;
use sawari_core::services::payout_service::{ApiError, AppState, PayoutDto, PayoutService};
use sawari_core::security::Claims;
use sawari_primitives::error::ApiErrorResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/payouts/{payout_id}/retry",
    tag = "Payouts",
    summary = "Re-dispatch a failed payout",
    description = "Only failed payouts with retry budget left can be retried; the original \
                   record keeps its audit trail and the new attempt carries the counter \
                   forward.",
    params(("payout_id" = Uuid, Path, description = "Payout id")),
    responses(
        (status = 200, description = "Retry dispatched", body = PayoutDto),
        (status = 400, description = "Payout is not failed, or the retry limit was reached", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "Payout not found", body = ApiErrorResponse),
        (status = 502, description = "Gateway refused the payout", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn retry_payout(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    Path(payout_id): Path<Uuid>,
) -> Result<Json<PayoutDto>, ApiError> {
    let response = PayoutService::retry_payout(&state, payout_id).await?;

    Ok(Json(response))
}
