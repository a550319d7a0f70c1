use axum::extract::{Extension, Json, State};
use sawari_core::services::payout_service::{
    ApiError, AppState, PayoutDto, PayoutService, TriggerPayoutRequest,
};
use sawari_core::security::Claims;
use sawari_primitives::error::ApiErrorResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/payouts",
    tag = "Payouts",
    summary = "Dispatch the driver's net share for a captured transaction",
    description = "Refuses unless the charge is captured and not yet settled. A payout \
                   already in flight for the transaction is returned unchanged, so \
                   concurrent triggers cannot double-pay.",
    request_body = TriggerPayoutRequest,
    responses(
        (status = 200, description = "Payout dispatched (or in-flight payout returned)", body = PayoutDto),
        (status = 400, description = "Transaction is not captured", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "Transaction not found", body = ApiErrorResponse),
        (status = 409, description = "Driver share already settled", body = ApiErrorResponse),
        (status = 502, description = "Gateway refused the payout", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn trigger_payout(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<Claims>,
    Json(req): Json<TriggerPayoutRequest>,
) -> Result<Json<PayoutDto>, ApiError> {
    let response = PayoutService::trigger_payout(&state, req.transaction_id, req.mode).await?;

    Ok(Json(response))
}
