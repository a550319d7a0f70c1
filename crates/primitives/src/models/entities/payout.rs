use crate::models::entities::enum_types::{PayoutMode, PayoutStatus};
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Ledger record of one attempted fund transfer to a driver.
///
/// A retry creates a new row carrying the incremented attempt counter; the
/// failed predecessor stays behind for reconciliation.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::payouts)]
#[diesel(belongs_to(crate::models::entities::transaction::Transaction))]
pub struct Payout {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub driver_id: Uuid,
    pub booking_id: Uuid,

    pub amount: i64,
    pub gateway_payout_id: Option<String>,

    pub status: PayoutStatus,
    pub mode: PayoutMode,

    pub retry_count: i32,
    pub max_retries: i32,
    pub next_retry_at: Option<DateTime<Utc>>,

    pub failure_code: Option<String>,
    pub failure_reason: Option<String>,
    pub utr: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payouts)]
pub struct NewPayout<'a> {
    pub transaction_id: Uuid,
    pub driver_id: Uuid,
    pub booking_id: Uuid,
    pub amount: i64,
    pub gateway_payout_id: Option<&'a str>,
    pub status: PayoutStatus,
    pub mode: PayoutMode,
    pub retry_count: i32,
    pub max_retries: i32,
}
