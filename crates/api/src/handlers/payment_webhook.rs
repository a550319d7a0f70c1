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
    path = "/webhooks/payments",
    tag = "Webhooks",
    summary = "Receive payment lifecycle events from the gateway",
    description = "Public signed endpoint. The signature is recomputed over the raw body \
                   bytes and a mismatch is rejected outright. Once the signature checks \
                   out the endpoint always acknowledges with 200: the gateway redelivers \
                   on non-2xx and every handler is an idempotent no-op on replay anyway, \
                   so retrying a poisoned event would only loop forever.",
    request_body(content = String, description = "Raw JSON event payload"),
    responses(
        (status = 200, description = "Event acknowledged; `success` reflects processing", body = WebhookAck),
        (status = 400, description = "Invalid signature or malformed payload", body = ApiErrorResponse)
    ),
    security(()),
)]
pub async fn payment_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    info!("Payment webhook received ({} bytes)", body.len());

    let event = WebhookService::construct_event(&state, &headers, &body)?;

    let success = match WebhookService::handle_event(&state, event) {
        Ok(_) => true,
        Err(e) => {
            error!("Payment webhook processing failed: {}", e);
            false
        }
    };

    Ok(Json(WebhookAck { success }))
}
