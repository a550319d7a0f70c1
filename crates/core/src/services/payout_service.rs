pub use crate::app_state::AppState;
use crate::repositories::payout_repository::PayoutRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::services::driver_account_service::DriverAccountService;
use chrono::Utc;
use diesel::prelude::*;
pub use sawari_primitives::{
    error::ApiError,
    models::dtos::payout_dto::{
        BatchPayoutOutcome, BatchPayoutRequest, BatchPayoutResponse, PayoutDto,
        TriggerPayoutRequest,
    },
    models::entities::enum_types::{PaymentStatus, PayoutMode, PayoutStatus, SettlementStatus},
    models::entities::payout::NewPayout,
};
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct PayoutService;

impl PayoutService {
    pub async fn trigger_payout(
        state: &AppState,
        transaction_id: Uuid,
        mode: PayoutMode,
    ) -> Result<PayoutDto, ApiError> {
        Self::create_payout(state, transaction_id, mode, 0).await
    }

    /// Dispatch the driver's net share for a captured transaction.
    ///
    /// `attempt` is 0 for the first dispatch and the predecessor's
    /// incremented retry counter afterwards; it feeds both the new row's
    /// counter and the gateway idempotency key, so concurrent duplicate
    /// triggers of the same attempt dedupe gateway-side.
    async fn create_payout(
        state: &AppState,
        transaction_id: Uuid,
        mode: PayoutMode,
        attempt: i32,
    ) -> Result<PayoutDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let tx = TransactionRepository::find_by_id(&mut conn, transaction_id)?
            .ok_or_else(|| ApiError::NotFound("Transaction not found".into()))?;

        if tx.payment_status != PaymentStatus::Captured {
            return Err(ApiError::Validation(format!(
                "Transaction is {}, not captured",
                tx.payment_status
            )));
        }

        if tx.payout_status == SettlementStatus::Completed {
            return Err(ApiError::Conflict(
                "Driver share has already been settled".into(),
            ));
        }

        // One live payout per transaction; a concurrent trigger gets the
        // in-flight row back instead of a duplicate.
        if let Some(existing) = PayoutRepository::find_active_by_transaction(&mut conn, tx.id)? {
            info!(
                "Payout {} already in flight for transaction {}",
                existing.id, tx.id
            );
            return Ok(existing.into());
        }

        let account = DriverAccountService::ensure_account(state, tx.driver_id).await?;

        let reference_id = tx.id.simple().to_string();
        let idempotency_key = format!("payout-{}-{}", tx.id.simple(), attempt);

        let dispatched = state
            .razorpay
            .create_payout(
                &state.config.razorpay_details.razorpay_account_number,
                &account.gateway_fund_account_id,
                tx.driver_net_amount,
                &state.config.currency,
                mode,
                &reference_id,
                &idempotency_key,
            )
            .await;

        let gateway_payout = match dispatched {
            Ok(p) => p,
            Err(e) => {
                error!("Payout dispatch failed for transaction {}: {}", tx.id, e);
                TransactionRepository::set_payout_status(
                    &mut conn,
                    tx.id,
                    SettlementStatus::Failed,
                )?;
                return Err(e);
            }
        };

        let status = gateway_payout
            .status
            .parse::<PayoutStatus>()
            .unwrap_or_else(|_| {
                warn!(
                    "Gateway payout {} reported unknown status {:?}, treating as queued",
                    gateway_payout.id, gateway_payout.status
                );
                PayoutStatus::Queued
            });

        let payout = conn.transaction::<_, ApiError, _>(|conn| {
            let payout = PayoutRepository::create(
                conn,
                NewPayout {
                    transaction_id: tx.id,
                    driver_id: tx.driver_id,
                    booking_id: tx.booking_id,
                    amount: tx.driver_net_amount,
                    gateway_payout_id: Some(&gateway_payout.id),
                    status,
                    mode,
                    retry_count: attempt,
                    max_retries: state.config.payout.max_retries,
                },
            )?;

            TransactionRepository::set_payout_status(conn, tx.id, SettlementStatus::Processing)?;

            Ok(payout)
        })?;

        info!(
            "Dispatched payout {} ({} {}) for transaction {}",
            payout.id, payout.amount, state.config.currency, tx.id
        );

        Ok(payout.into())
    }

    /// Re-dispatch a failed payout. The original row keeps the audit trail
    /// and the incremented counter; the new attempt carries it forward.
    pub async fn retry_payout(state: &AppState, payout_id: Uuid) -> Result<PayoutDto, ApiError> {
        let payout = {
            let mut conn = state
                .db
                .get()
                .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

            let payout = PayoutRepository::find_by_id(&mut conn, payout_id)?
                .ok_or_else(|| ApiError::NotFound("Payout not found".into()))?;

            if payout.status != PayoutStatus::Failed {
                return Err(ApiError::Validation(format!(
                    "Only failed payouts can be retried, this one is {}",
                    payout.status
                )));
            }

            if payout.retry_count >= payout.max_retries {
                return Err(ApiError::Validation(format!(
                    "Retry limit reached ({} of {})",
                    payout.retry_count, payout.max_retries
                )));
            }

            PayoutRepository::increment_retry_count(&mut conn, payout.id)?;
            payout
        };

        Self::create_payout(
            state,
            payout.transaction_id,
            payout.mode,
            payout.retry_count + 1,
        )
        .await
    }

    /// Best-effort fan-out; one bad transaction never aborts the batch.
    pub async fn batch_trigger(
        state: &AppState,
        req: BatchPayoutRequest,
    ) -> BatchPayoutResponse {
        let mut results = Vec::with_capacity(req.transaction_ids.len());

        for transaction_id in req.transaction_ids {
            match Self::trigger_payout(state, transaction_id, req.mode).await {
                Ok(payout) => results.push(BatchPayoutOutcome {
                    transaction_id,
                    success: true,
                    payout_id: Some(payout.id),
                    message: None,
                }),
                Err(e) => {
                    warn!("Batch payout skipped transaction {}: {}", transaction_id, e);
                    results.push(BatchPayoutOutcome {
                        transaction_id,
                        success: false,
                        payout_id: None,
                        message: Some(e.to_string()),
                    });
                }
            }
        }

        BatchPayoutResponse { results }
    }

    /// Sweep entry point for the external scheduler: retry every failed
    /// payout whose backoff has elapsed, in a bounded batch.
    pub async fn sweep_due_retries(state: &AppState, limit: i64) -> Result<usize, ApiError> {
        let due = {
            let mut conn = state
                .db
                .get()
                .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;
            PayoutRepository::find_due_retries(&mut conn, Utc::now(), limit)?
        };

        let mut retried = 0;
        for payout in due {
            match Self::retry_payout(state, payout.id).await {
                Ok(_) => retried += 1,
                Err(e) => warn!("Sweep could not retry payout {}: {}", payout.id, e),
            }
        }

        Ok(retried)
    }
}
