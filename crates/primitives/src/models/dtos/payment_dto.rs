use crate::models::entities::enum_types::PaymentStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1))]
    pub order_id: String,
    #[validate(length(min = 1))]
    pub payment_id: String,
    #[validate(length(min = 1))]
    pub signature: String,
    pub transaction_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub verified: bool,
    pub status: PaymentStatus,
    pub amount: i64,
}
