use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub booking_id: Uuid,
}

/// Everything checkout needs to open the gateway widget, and nothing more.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub transaction_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}
