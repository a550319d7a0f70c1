use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use http::HeaderMap;
use sawari_core::services::webhook_service::{ApiError, AppState, WebhookService};
use sawari_primitives::error::ApiErrorResponse;
use sawari_primitives::models::dtos::webhook_dto::WebhookAck;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/webhooks/payouts",
    tag = "Webhooks",
    summary = "Receive payout lifecycle events from the gateway",
    description = "Public signed endpoint for `payout.processed`, `payout.failed` and \
                   `payout.reversed`. Same acknowledgement policy as the payment webhook: \
                   fail closed on a bad signature, otherwise always 200.",
    request_body(content = String, description = "Raw JSON event payload"),
    responses(
        (status = 200, description = "Event acknowledged; `success` reflects processing", body = WebhookAck),
        (status = 400, description = "Invalid signature or malformed payload", body = ApiErrorResponse)
    ),
    security(()),
)]
pub async fn payout_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    info!("Payout webhook received ({} bytes)", body.len());

    let event = WebhookService::construct_event(&state, &headers, &body)?;

    let success = match WebhookService::handle_event(&state, event) {
        Ok(_) => true,
        Err(e) => {
            error!("Payout webhook processing failed: {}", e);
            false
        }
    };

    Ok(Json(WebhookAck { success }))
}
