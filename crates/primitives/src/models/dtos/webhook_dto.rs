use serde::Serialize;
use utoipa::ToSchema;

/// Webhook endpoints always acknowledge with this body once the signature
/// checks out; `success:false` means the event was received but processing
/// raised (logged server-side, never retried by the gateway).
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub success: bool,
}
