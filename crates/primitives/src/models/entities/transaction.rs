use crate::models::entities::enum_types::{PaymentStatus, SettlementStatus};
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Ledger record of one attempted passenger charge for a booking.
///
/// Rows are never deleted; a failed charge stays behind as audit trail and a
/// fresh attempt gets a fresh row.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(belongs_to(crate::models::entities::booking::Booking))]
pub struct Transaction {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub passenger_id: Uuid,
    pub driver_id: Uuid,

    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,

    pub amount: i64,
    pub base_commission_amount: i64,
    pub commission_bps: i64,
    pub gst_amount: i64,
    pub gst_bps: i64,
    pub platform_total: i64,
    pub driver_net_amount: i64,

    pub payment_status: PaymentStatus,
    pub payout_status: SettlementStatus,

    pub payment_method: Option<String>,
    pub payment_signature: Option<String>,
    pub captured_at: Option<DateTime<Utc>>,

    pub error_code: Option<String>,
    pub error_description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction<'a> {
    pub booking_id: Uuid,
    pub passenger_id: Uuid,
    pub driver_id: Uuid,
    pub gateway_order_id: &'a str,
    pub amount: i64,
    pub base_commission_amount: i64,
    pub commission_bps: i64,
    pub gst_amount: i64,
    pub gst_bps: i64,
    pub platform_total: i64,
    pub driver_net_amount: i64,
    pub payment_status: PaymentStatus,
    pub payout_status: SettlementStatus,
}
