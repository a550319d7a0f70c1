pub use crate::app_state::AppState;
use crate::repositories::transaction_repository::TransactionRepository;
pub use crate::security::Claims;
use crate::services::transaction_service::TransactionService;
use hmac::{Hmac, Mac};
pub use sawari_primitives::{
    error::ApiError,
    models::dtos::payment_dto::{VerifyPaymentRequest, VerifyPaymentResponse},
};
use secrecy::ExposeSecret;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{error, info};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub struct VerificationService;

impl VerificationService {
    /// Client-callback path: checkout hands back `(order_id, payment_id,
    /// signature)` after the widget closes. The signature proves the tuple
    /// came from the gateway; the payment fetch is still the authority on
    /// whether money actually moved.
    pub async fn verify_payment(
        state: &AppState,
        passenger_id: Uuid,
        req: VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let tx = TransactionRepository::find_by_id(&mut conn, req.transaction_id)?
            .ok_or_else(|| ApiError::NotFound("Transaction not found".into()))?;

        if tx.passenger_id != passenger_id {
            return Err(ApiError::Forbidden(
                "Transaction belongs to another passenger".into(),
            ));
        }

        if req.order_id != tx.gateway_order_id {
            return Err(ApiError::Validation(
                "Order does not belong to this transaction".into(),
            ));
        }

        let genuine = Self::checkout_signature_matches(
            state
                .config
                .razorpay_details
                .razorpay_key_secret
                .expose_secret(),
            &req.order_id,
            &req.payment_id,
            &req.signature,
        )?;

        if !genuine {
            error!("Checkout signature mismatch for transaction {}", tx.id);
            let _ = TransactionService::fail_payment(
                &mut conn,
                tx.id,
                Some("SIGNATURE_MISMATCH"),
                Some("Checkout signature did not match"),
            )?;
            return Err(ApiError::SignatureMismatch(
                "Checkout signature did not match".into(),
            ));
        }

        // Authoritative record. A transport failure here is retryable and
        // must not move the transaction anywhere.
        let payment = state.razorpay.fetch_payment(&req.payment_id).await?;

        if !matches!(payment.status.as_str(), "captured" | "authorized") {
            info!(
                "Payment {} reported status {} for transaction {}",
                payment.id, payment.status, tx.id
            );
            let _ = TransactionService::fail_payment(
                &mut conn,
                tx.id,
                payment.error_code.as_deref(),
                Some(&payment.status),
            )?;
            return Err(ApiError::Payment(format!(
                "Payment status is {}",
                payment.status
            )));
        }

        TransactionService::capture(
            &mut conn,
            tx.id,
            &payment.id,
            payment.method.as_deref(),
            Some(&req.signature),
        )?;

        let tx = TransactionRepository::find_by_id(&mut conn, tx.id)?
            .ok_or_else(|| ApiError::Internal("Transaction vanished after capture".into()))?;

        Ok(VerifyPaymentResponse {
            verified: true,
            status: tx.payment_status,
            amount: tx.amount,
        })
    }

    /// `HMAC_SHA256(secret, order_id + "|" + payment_id)`, hex-encoded,
    /// compared in constant time.
    pub fn checkout_signature_matches(
        secret: &str,
        order_id: &str,
        payment_id: &str,
        provided: &str,
    ) -> Result<bool, ApiError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ApiError::Internal("Invalid checkout secret".into()))?;

        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        Ok(expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() == 1)
    }
}
