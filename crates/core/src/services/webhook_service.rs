pub use crate::app_state::AppState;
use crate::repositories::driver_account_repository::DriverAccountRepository;
use crate::repositories::payout_repository::PayoutRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::services::transaction_service::TransactionService;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use hmac::{Hmac, Mac};
use http::HeaderMap;
pub use sawari_primitives::error::ApiError;
use sawari_primitives::models::dtos::providers::razorpay::{
    RazorpayPayment, RazorpayPayout, RazorpayWebhook,
};
use sawari_primitives::models::entities::enum_types::{PayoutStatus, SettlementStatus};
use secrecy::ExposeSecret;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

type HmacSha256 = Hmac<Sha256>;

pub enum WebhookOutcome {
    Processed,
    Ignored,
}

/// Gateway lifecycle events, one variant per event type the engine acts on.
/// Everything else lands in `Unknown` and is logged, never silently dropped.
pub enum GatewayEvent {
    PaymentAuthorized(RazorpayPayment),
    PaymentCaptured(RazorpayPayment),
    PaymentFailed(RazorpayPayment),
    PayoutProcessed(RazorpayPayout),
    PayoutFailed(RazorpayPayout),
    PayoutReversed(RazorpayPayout),
    Unknown(String),
}

pub struct WebhookService;

impl WebhookService {
    /// Signature over the raw body bytes, then parse, then classify. A bad
    /// signature fails closed before anything is looked at.
    pub fn construct_event(
        state: &AppState,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<GatewayEvent, ApiError> {
        let signature = headers
            .get("x-razorpay-signature")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::SignatureMismatch("Missing webhook signature".into()))?;

        Self::verify_webhook_signature(
            state
                .config
                .razorpay_details
                .razorpay_webhook_secret
                .expose_secret(),
            body,
            signature,
        )?;

        let webhook: RazorpayWebhook = serde_json::from_slice(body)
            .map_err(|_| ApiError::Validation("Invalid webhook payload".into()))?;

        Self::classify(webhook)
    }

    pub fn verify_webhook_signature(
        secret: &str,
        payload: &[u8],
        provided: &str,
    ) -> Result<(), ApiError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ApiError::Internal("Invalid webhook secret".into()))?;

        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        if expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() != 1 {
            return Err(ApiError::SignatureMismatch(
                "Invalid webhook signature".into(),
            ));
        }

        Ok(())
    }

    pub fn classify(webhook: RazorpayWebhook) -> Result<GatewayEvent, ApiError> {
        let RazorpayWebhook { event, payload } = webhook;

        let payment = payload.payment.map(|e| e.entity);
        let payout = payload.payout.map(|e| e.entity);

        Ok(match event.as_str() {
            "payment.authorized" => {
                GatewayEvent::PaymentAuthorized(payment.ok_or_else(|| missing(&event, "payment"))?)
            }
            "payment.captured" => {
                GatewayEvent::PaymentCaptured(payment.ok_or_else(|| missing(&event, "payment"))?)
            }
            "payment.failed" => {
                GatewayEvent::PaymentFailed(payment.ok_or_else(|| missing(&event, "payment"))?)
            }
            "payout.processed" => {
                GatewayEvent::PayoutProcessed(payout.ok_or_else(|| missing(&event, "payout"))?)
            }
            "payout.failed" => {
                GatewayEvent::PayoutFailed(payout.ok_or_else(|| missing(&event, "payout"))?)
            }
            "payout.reversed" => {
                GatewayEvent::PayoutReversed(payout.ok_or_else(|| missing(&event, "payout"))?)
            }
            _ => GatewayEvent::Unknown(event),
        })
    }

    /// Every handler is idempotent, keyed on the gateway's own identifiers.
    /// Replays land on a conditional update that moves zero rows.
    pub fn handle_event(
        state: &AppState,
        event: GatewayEvent,
    ) -> Result<WebhookOutcome, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        match event {
            GatewayEvent::PaymentAuthorized(payment) => {
                Self::handle_payment_authorized(&mut conn, payment)
            }
            GatewayEvent::PaymentCaptured(payment) => {
                Self::handle_payment_captured(&mut conn, payment)
            }
            GatewayEvent::PaymentFailed(payment) => {
                Self::handle_payment_failed(&mut conn, payment)
            }
            GatewayEvent::PayoutProcessed(payout) => {
                Self::handle_payout_processed(&mut conn, payout)
            }
            GatewayEvent::PayoutFailed(payout) => {
                Self::handle_payout_failed(state, &mut conn, payout)
            }
            GatewayEvent::PayoutReversed(payout) => {
                Self::handle_payout_reversed(&mut conn, payout)
            }
            GatewayEvent::Unknown(name) => {
                info!("Ignoring unhandled gateway event: {}", name);
                Ok(WebhookOutcome::Ignored)
            }
        }
    }

    fn handle_payment_authorized(
        conn: &mut PgConnection,
        payment: RazorpayPayment,
    ) -> Result<WebhookOutcome, ApiError> {
        let order_id = payment
            .order_id
            .as_deref()
            .ok_or_else(|| ApiError::Validation("Payment event missing order id".into()))?;

        let tx = TransactionRepository::find_by_gateway_order_id(conn, order_id)?
            .ok_or_else(|| ApiError::NotFound(format!("No transaction for order {}", order_id)))?;

        let moved = TransactionRepository::mark_pending(conn, tx.id, Some(&payment.id))?;
        if moved == 0 {
            info!(
                "Transaction {} already past created, authorization is a no-op",
                tx.id
            );
        }

        Ok(WebhookOutcome::Processed)
    }

    fn handle_payment_captured(
        conn: &mut PgConnection,
        payment: RazorpayPayment,
    ) -> Result<WebhookOutcome, ApiError> {
        let order_id = payment
            .order_id
            .as_deref()
            .ok_or_else(|| ApiError::Validation("Payment event missing order id".into()))?;

        let tx = TransactionRepository::find_by_gateway_order_id(conn, order_id)?
            .ok_or_else(|| ApiError::NotFound(format!("No transaction for order {}", order_id)))?;

        TransactionService::capture(conn, tx.id, &payment.id, payment.method.as_deref(), None)?;

        Ok(WebhookOutcome::Processed)
    }

    fn handle_payment_failed(
        conn: &mut PgConnection,
        payment: RazorpayPayment,
    ) -> Result<WebhookOutcome, ApiError> {
        let order_id = payment
            .order_id
            .as_deref()
            .ok_or_else(|| ApiError::Validation("Payment event missing order id".into()))?;

        let tx = TransactionRepository::find_by_gateway_order_id(conn, order_id)?
            .ok_or_else(|| ApiError::NotFound(format!("No transaction for order {}", order_id)))?;

        TransactionService::fail_payment(
            conn,
            tx.id,
            payment.error_code.as_deref(),
            payment.error_description.as_deref(),
        )?;

        Ok(WebhookOutcome::Processed)
    }

    fn handle_payout_processed(
        conn: &mut PgConnection,
        event: RazorpayPayout,
    ) -> Result<WebhookOutcome, ApiError> {
        conn.transaction(|conn| {
            let payout = PayoutRepository::find_by_gateway_payout_id_for_update(conn, &event.id)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("No payout for gateway payout {}", event.id))
                })?;

            if payout.status == PayoutStatus::Processed {
                info!("Payout {} already processed, skipping replay", payout.id);
                return Ok(WebhookOutcome::Ignored);
            }

            let moved = PayoutRepository::mark_processed(conn, payout.id, event.utr.as_deref())?;
            if moved == 0 {
                warn!(
                    "Payout {} in state {} ignored a processed event",
                    payout.id, payout.status
                );
                return Ok(WebhookOutcome::Ignored);
            }

            TransactionRepository::set_payout_status(
                conn,
                payout.transaction_id,
                SettlementStatus::Completed,
            )?;

            // The processed transition above moved exactly once, so the
            // running totals move exactly once per gateway payout id.
            DriverAccountRepository::record_settlement(conn, payout.driver_id, payout.amount)?;

            info!(
                "Payout {} settled (utr {:?}) for transaction {}",
                payout.id, event.utr, payout.transaction_id
            );
            Ok(WebhookOutcome::Processed)
        })
    }

    fn handle_payout_failed(
        state: &AppState,
        conn: &mut PgConnection,
        event: RazorpayPayout,
    ) -> Result<WebhookOutcome, ApiError> {
        let backoff = Duration::seconds(state.config.payout.retry_backoff_secs);

        conn.transaction(|conn| {
            let payout = PayoutRepository::find_by_gateway_payout_id_for_update(conn, &event.id)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("No payout for gateway payout {}", event.id))
                })?;

            if !payout.status.can_fail() {
                info!(
                    "Payout {} in state {} ignored a failed event",
                    payout.id, payout.status
                );
                return Ok(WebhookOutcome::Ignored);
            }

            let (code, reason) = failure_details(&event);
            let next_retry_at = (payout.retry_count < payout.max_retries)
                .then(|| Utc::now() + backoff);

            PayoutRepository::mark_failed(conn, payout.id, code, reason, next_retry_at)?;
            TransactionRepository::set_payout_status(
                conn,
                payout.transaction_id,
                SettlementStatus::Failed,
            )?;

            warn!(
                "Payout {} failed ({:?}); retry {} of {}, next at {:?}",
                payout.id, reason, payout.retry_count, payout.max_retries, next_retry_at
            );
            Ok(WebhookOutcome::Processed)
        })
    }

    fn handle_payout_reversed(
        conn: &mut PgConnection,
        event: RazorpayPayout,
    ) -> Result<WebhookOutcome, ApiError> {
        conn.transaction(|conn| {
            let payout = PayoutRepository::find_by_gateway_payout_id_for_update(conn, &event.id)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("No payout for gateway payout {}", event.id))
                })?;

            if payout.status == PayoutStatus::Reversed {
                info!("Payout {} already reversed, skipping replay", payout.id);
                return Ok(WebhookOutcome::Ignored);
            }

            if !payout.status.can_reverse() {
                warn!(
                    "Payout {} in state {} ignored a reversed event",
                    payout.id, payout.status
                );
                return Ok(WebhookOutcome::Ignored);
            }

            let (_, reason) = failure_details(&event);
            PayoutRepository::mark_reversed(conn, payout.id, reason)?;
            TransactionRepository::set_payout_status(
                conn,
                payout.transaction_id,
                SettlementStatus::Failed,
            )?;

            // Money came back after leaving; no automatic retry, an operator
            // has to look at this one.
            warn!(
                "Payout {} reversed for transaction {}; flagged for manual remediation",
                payout.id, payout.transaction_id
            );
            Ok(WebhookOutcome::Processed)
        })
    }
}

fn missing(event: &str, kind: &str) -> ApiError {
    ApiError::Validation(format!("{} event missing {} entity", event, kind))
}

fn failure_details(event: &RazorpayPayout) -> (Option<&str>, Option<&str>) {
    let code = event
        .status_details
        .as_ref()
        .and_then(|d| d.reason.as_deref());
    let reason = event
        .failure_reason
        .as_deref()
        .or_else(|| {
            event
                .status_details
                .as_ref()
                .and_then(|d| d.description.as_deref())
        });
    (code, reason)
}
