use crate::models::entities::enum_types::{PaymentStatus, SettlementStatus};
use crate::models::entities::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Ledger view consumed by dashboards; payout progress surfaces here rather
/// than through any synchronous error channel.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionDto {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: i64,
    pub base_commission_amount: i64,
    pub gst_amount: i64,
    pub platform_total: i64,
    pub driver_net_amount: i64,
    pub payment_status: PaymentStatus,
    pub payout_status: SettlementStatus,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub captured_at: Option<DateTime<Utc>>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionDto {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            booking_id: tx.booking_id,
            amount: tx.amount,
            base_commission_amount: tx.base_commission_amount,
            gst_amount: tx.gst_amount,
            platform_total: tx.platform_total,
            driver_net_amount: tx.driver_net_amount,
            payment_status: tx.payment_status,
            payout_status: tx.payout_status,
            gateway_order_id: tx.gateway_order_id,
            gateway_payment_id: tx.gateway_payment_id,
            captured_at: tx.captured_at,
            error_code: tx.error_code,
            error_description: tx.error_description,
            created_at: tx.created_at,
        }
    }
}
