use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sawari_primitives::error::ApiError;
use sawari_primitives::models::entities::enum_types::PayoutStatus;
use sawari_primitives::models::entities::payout::{NewPayout, Payout};
use sawari_primitives::schema::payouts;
use uuid::Uuid;

/// Payout transitions follow the same conditional-update discipline as the
/// transaction ledger; webhooks replayed by the gateway land on a 0-row
/// update and change nothing.
pub struct PayoutRepository;

fn live_payout_states() -> Vec<PayoutStatus> {
    vec![
        PayoutStatus::Queued,
        PayoutStatus::Pending,
        PayoutStatus::Processing,
    ]
}

impl PayoutRepository {
    pub fn create(conn: &mut PgConnection, new_payout: NewPayout) -> Result<Payout, ApiError> {
        diesel::insert_into(payouts::table)
            .values(&new_payout)
            .get_result::<Payout>(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Payout>, ApiError> {
        payouts::table
            .find(id)
            .first::<Payout>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_active_by_transaction(
        conn: &mut PgConnection,
        transaction_id: Uuid,
    ) -> Result<Option<Payout>, ApiError> {
        payouts::table
            .filter(payouts::transaction_id.eq(transaction_id))
            .filter(payouts::status.eq_any(live_payout_states()))
            .first::<Payout>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_gateway_payout_id_for_update(
        conn: &mut PgConnection,
        gateway_payout_id: &str,
    ) -> Result<Option<Payout>, ApiError> {
        payouts::table
            .filter(payouts::gateway_payout_id.eq(gateway_payout_id))
            .for_update()
            .first::<Payout>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn mark_processed(
        conn: &mut PgConnection,
        id: Uuid,
        utr: Option<&str>,
    ) -> Result<usize, ApiError> {
        diesel::update(payouts::table.find(id))
            .filter(payouts::status.eq_any(live_payout_states()))
            .set((
                payouts::status.eq(PayoutStatus::Processed),
                payouts::utr.eq(utr),
                payouts::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_failed(
        conn: &mut PgConnection,
        id: Uuid,
        failure_code: Option<&str>,
        failure_reason: Option<&str>,
        next_retry_at: Option<DateTime<Utc>>,
    ) -> Result<usize, ApiError> {
        diesel::update(payouts::table.find(id))
            .filter(payouts::status.eq_any(live_payout_states()))
            .set((
                payouts::status.eq(PayoutStatus::Failed),
                payouts::failure_code.eq(failure_code),
                payouts::failure_reason.eq(failure_reason),
                payouts::next_retry_at.eq(next_retry_at),
                payouts::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_reversed(
        conn: &mut PgConnection,
        id: Uuid,
        failure_reason: Option<&str>,
    ) -> Result<usize, ApiError> {
        diesel::update(payouts::table.find(id))
            .filter(payouts::status.eq_any(vec![PayoutStatus::Processing, PayoutStatus::Processed]))
            .set((
                payouts::status.eq(PayoutStatus::Reversed),
                payouts::failure_reason.eq(failure_reason),
                payouts::next_retry_at.eq(None::<DateTime<Utc>>),
                payouts::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn increment_retry_count(conn: &mut PgConnection, id: Uuid) -> Result<(), ApiError> {
        diesel::update(payouts::table.find(id))
            .set((
                payouts::retry_count.eq(payouts::retry_count + 1),
                payouts::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }

    /// Failed payouts whose backoff window has elapsed and which still have
    /// retry budget, oldest first, bounded for the sweep.
    pub fn find_due_retries(
        conn: &mut PgConnection,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Payout>, ApiError> {
        payouts::table
            .filter(payouts::status.eq(PayoutStatus::Failed))
            .filter(payouts::retry_count.lt(payouts::max_retries))
            .filter(payouts::next_retry_at.le(now))
            .order(payouts::next_retry_at.asc())
            .limit(limit)
            .load::<Payout>(conn)
            .map_err(ApiError::from)
    }
}
