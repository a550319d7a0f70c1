pub use crate::app_state::AppState;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use diesel::prelude::*;
use sawari_primitives::error::ApiError;
use sawari_primitives::models::dtos::transaction_dto::TransactionDto;
use sawari_primitives::models::entities::enum_types::PaymentStatus;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured,
    AlreadyCaptured,
}

pub struct TransactionService;

impl TransactionService {
    /// Ledger view for the passenger or driver of the transaction.
    pub fn get_for_user(
        state: &AppState,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<TransactionDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let tx = TransactionRepository::find_by_id(&mut conn, transaction_id)?
            .ok_or_else(|| ApiError::NotFound("Transaction not found".into()))?;

        if tx.passenger_id != user_id && tx.driver_id != user_id {
            return Err(ApiError::Forbidden(
                "Transaction belongs to another user".into(),
            ));
        }

        Ok(tx.into())
    }

    /// The single capture transition, shared by the client-callback verifier
    /// and the webhook ingestor. The verifier and the `payment.captured`
    /// webhook race on the same row; whichever arrives first wins and the
    /// other lands here as a no-op.
    pub fn capture(
        conn: &mut PgConnection,
        transaction_id: Uuid,
        gateway_payment_id: &str,
        payment_method: Option<&str>,
        payment_signature: Option<&str>,
    ) -> Result<CaptureOutcome, ApiError> {
        conn.transaction(|conn| {
            let tx = TransactionRepository::find_by_id_for_update(conn, transaction_id)?
                .ok_or_else(|| ApiError::NotFound("Transaction not found".into()))?;

            if tx.payment_status == PaymentStatus::Captured {
                info!("Transaction {} already captured, skipping", tx.id);
                return Ok(CaptureOutcome::AlreadyCaptured);
            }

            if !tx.payment_status.can_capture() {
                return Err(ApiError::Conflict(format!(
                    "Transaction {} cannot be captured from state {}",
                    tx.id, tx.payment_status
                )));
            }

            let updated = TransactionRepository::capture(
                conn,
                tx.id,
                gateway_payment_id,
                payment_method,
                payment_signature,
            )?;
            if updated == 0 {
                return Ok(CaptureOutcome::AlreadyCaptured);
            }

            BookingRepository::mark_completed(conn, tx.booking_id)?;

            info!(
                "Captured payment {} for transaction {}",
                gateway_payment_id, tx.id
            );
            Ok(CaptureOutcome::Captured)
        })
    }

    /// Terminal failure on the charge side. Returns false when the row had
    /// already left the failable states (capture won the race, or the
    /// failure was applied before).
    pub fn fail_payment(
        conn: &mut PgConnection,
        transaction_id: Uuid,
        error_code: Option<&str>,
        error_description: Option<&str>,
    ) -> Result<bool, ApiError> {
        conn.transaction(|conn| {
            let tx = TransactionRepository::find_by_id_for_update(conn, transaction_id)?
                .ok_or_else(|| ApiError::NotFound("Transaction not found".into()))?;

            if !tx.payment_status.can_fail() {
                info!(
                    "Skipping failure for transaction {} in state {}",
                    tx.id, tx.payment_status
                );
                return Ok(false);
            }

            TransactionRepository::mark_payment_failed(
                conn,
                tx.id,
                error_code,
                error_description,
            )?;
            BookingRepository::mark_payment_failed(conn, tx.booking_id)?;

            Ok(true)
        })
    }
}
