use chrono::Utc;
use diesel::prelude::*;
use sawari_primitives::error::ApiError;
use sawari_primitives::models::entities::driver_payout_account::{
    DriverPayoutAccount, NewDriverPayoutAccount,
};
use sawari_primitives::schema::driver_payout_accounts;
use uuid::Uuid;

pub struct DriverAccountRepository;

impl DriverAccountRepository {
    pub fn find_by_driver(
        conn: &mut PgConnection,
        driver_id: Uuid,
    ) -> Result<Option<DriverPayoutAccount>, ApiError> {
        driver_payout_accounts::table
            .find(driver_id)
            .first::<DriverPayoutAccount>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Concurrent first-time setups race on the primary key; the loser keeps
    /// the winner's row.
    pub fn upsert(
        conn: &mut PgConnection,
        new_account: NewDriverPayoutAccount,
    ) -> Result<DriverPayoutAccount, ApiError> {
        let driver_id = new_account.driver_id;

        let inserted = diesel::insert_into(driver_payout_accounts::table)
            .values(&new_account)
            .on_conflict(driver_payout_accounts::driver_id)
            .do_nothing()
            .get_result::<DriverPayoutAccount>(conn)
            .optional()?;

        match inserted {
            Some(account) => Ok(account),
            None => driver_payout_accounts::table
                .find(driver_id)
                .first::<DriverPayoutAccount>(conn)
                .map_err(ApiError::from),
        }
    }

    /// Called exactly once per distinct gateway payout id, guarded by the
    /// payout row's processed transition.
    pub fn record_settlement(
        conn: &mut PgConnection,
        driver_id: Uuid,
        amount: i64,
    ) -> Result<(), ApiError> {
        diesel::update(driver_payout_accounts::table.find(driver_id))
            .set((
                driver_payout_accounts::payouts_received
                    .eq(driver_payout_accounts::payouts_received + 1),
                driver_payout_accounts::total_amount_received
                    .eq(driver_payout_accounts::total_amount_received + amount),
                driver_payout_accounts::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }
}
