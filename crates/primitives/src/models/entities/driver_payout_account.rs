use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// One payout destination per driver, provisioned lazily on first setup.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::driver_payout_accounts)]
#[diesel(primary_key(driver_id))]
pub struct DriverPayoutAccount {
    pub driver_id: Uuid,
    pub gateway_contact_id: String,
    pub gateway_fund_account_id: String,
    pub verified: bool,
    pub active: bool,
    pub payouts_received: i64,
    pub total_amount_received: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::driver_payout_accounts)]
pub struct NewDriverPayoutAccount<'a> {
    pub driver_id: Uuid,
    pub gateway_contact_id: &'a str,
    pub gateway_fund_account_id: &'a str,
    pub verified: bool,
    pub active: bool,
}
