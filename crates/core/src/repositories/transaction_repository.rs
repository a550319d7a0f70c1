use chrono::Utc;
use diesel::prelude::*;
use sawari_primitives::error::ApiError;
use sawari_primitives::models::entities::enum_types::{PaymentStatus, SettlementStatus};
use sawari_primitives::models::entities::transaction::{NewTransaction, Transaction};
use sawari_primitives::schema::transactions;
use uuid::Uuid;

/// Charge-side transitions are conditional updates filtered on the current
/// `payment_status`; an affected-row count of 0 means another writer got
/// there first and the caller must treat the call as a no-op.
pub struct TransactionRepository;

fn active_payment_states() -> Vec<PaymentStatus> {
    vec![
        PaymentStatus::Created,
        PaymentStatus::Pending,
        PaymentStatus::Captured,
    ]
}

impl TransactionRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_tx: NewTransaction,
    ) -> Result<Transaction, ApiError> {
        diesel::insert_into(transactions::table)
            .values(&new_tx)
            .get_result::<Transaction>(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .find(id)
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .find(id)
            .for_update()
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_active_by_booking(
        conn: &mut PgConnection,
        booking_id: Uuid,
    ) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::booking_id.eq(booking_id))
            .filter(transactions::payment_status.eq_any(active_payment_states()))
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_gateway_order_id(
        conn: &mut PgConnection,
        gateway_order_id: &str,
    ) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::gateway_order_id.eq(gateway_order_id))
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// created → pending, recording the gateway payment id if one is known.
    pub fn mark_pending(
        conn: &mut PgConnection,
        id: Uuid,
        gateway_payment_id: Option<&str>,
    ) -> Result<usize, ApiError> {
        diesel::update(transactions::table.find(id))
            .filter(transactions::payment_status.eq(PaymentStatus::Created))
            .set((
                transactions::payment_status.eq(PaymentStatus::Pending),
                transactions::gateway_payment_id.eq(gateway_payment_id),
                transactions::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    /// The capture compare-and-swap: only a created/pending row moves.
    pub fn capture(
        conn: &mut PgConnection,
        id: Uuid,
        gateway_payment_id: &str,
        payment_method: Option<&str>,
        payment_signature: Option<&str>,
    ) -> Result<usize, ApiError> {
        diesel::update(transactions::table.find(id))
            .filter(
                transactions::payment_status
                    .eq_any(vec![PaymentStatus::Created, PaymentStatus::Pending]),
            )
            .set((
                transactions::payment_status.eq(PaymentStatus::Captured),
                transactions::gateway_payment_id.eq(gateway_payment_id),
                transactions::payment_method.eq(payment_method),
                transactions::payment_signature.eq(payment_signature),
                transactions::captured_at.eq(Utc::now()),
                transactions::error_code.eq(None::<String>),
                transactions::error_description.eq(None::<String>),
                transactions::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_payment_failed(
        conn: &mut PgConnection,
        id: Uuid,
        error_code: Option<&str>,
        error_description: Option<&str>,
    ) -> Result<usize, ApiError> {
        diesel::update(transactions::table.find(id))
            .filter(
                transactions::payment_status
                    .eq_any(vec![PaymentStatus::Created, PaymentStatus::Pending]),
            )
            .set((
                transactions::payment_status.eq(PaymentStatus::Failed),
                transactions::error_code.eq(error_code),
                transactions::error_description.eq(error_description),
                transactions::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn set_payout_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: SettlementStatus,
    ) -> Result<(), ApiError> {
        diesel::update(transactions::table.find(id))
            .set((
                transactions::payout_status.eq(status),
                transactions::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }
}
