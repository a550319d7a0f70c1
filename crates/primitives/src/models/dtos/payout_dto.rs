use crate::models::entities::enum_types::{PayoutMode, PayoutStatus};
use crate::models::entities::payout::Payout;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TriggerPayoutRequest {
    pub transaction_id: Uuid,
    pub mode: PayoutMode,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayoutDto {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub driver_id: Uuid,
    pub amount: i64,
    pub status: PayoutStatus,
    pub mode: PayoutMode,
    pub retry_count: i32,
    pub max_retries: i32,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub gateway_payout_id: Option<String>,
    pub utr: Option<String>,
}

impl From<Payout> for PayoutDto {
    fn from(p: Payout) -> Self {
        Self {
            id: p.id,
            transaction_id: p.transaction_id,
            driver_id: p.driver_id,
            amount: p.amount,
            status: p.status,
            mode: p.mode,
            retry_count: p.retry_count,
            max_retries: p.max_retries,
            next_retry_at: p.next_retry_at,
            gateway_payout_id: p.gateway_payout_id,
            utr: p.utr,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct BatchPayoutRequest {
    #[validate(length(min = 1, max = 100))]
    pub transaction_ids: Vec<Uuid>,
    pub mode: PayoutMode,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchPayoutOutcome {
    pub transaction_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchPayoutResponse {
    pub results: Vec<BatchPayoutOutcome>,
}
