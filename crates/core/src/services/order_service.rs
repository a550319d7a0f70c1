pub use crate::app_state::AppState;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::services::commission_service::CommissionService;
pub use crate::security::Claims;
use diesel::prelude::*;
pub use sawari_primitives::{
    error::ApiError,
    models::{
        dtos::order_dto::{CreateOrderRequest, CreateOrderResponse},
        entities::enum_types::{BookingPaymentStatus, PaymentStatus, SettlementStatus},
        entities::transaction::{NewTransaction, Transaction},
    },
};
use tracing::info;
use uuid::Uuid;

pub struct OrderService;

impl OrderService {
    /// Open a charge intent for a booking. At most one charge per booking is
    /// ever live; a re-submit while one is live returns it unchanged.
    pub async fn create_order(
        state: &AppState,
        passenger_id: Uuid,
        req: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let booking = BookingRepository::find_by_id(&mut conn, req.booking_id)?
            .ok_or_else(|| ApiError::NotFound("Booking not found".into()))?;

        if booking.passenger_id != passenger_id {
            return Err(ApiError::Forbidden(
                "Booking belongs to another passenger".into(),
            ));
        }

        if booking.payment_status == BookingPaymentStatus::Paid {
            return Err(ApiError::Conflict("Booking is already paid".into()));
        }

        // Idempotent re-issue: tolerate client double-submits.
        if let Some(tx) = TransactionRepository::find_active_by_booking(&mut conn, booking.id)? {
            info!(
                "Re-issuing order {} for booking {}",
                tx.gateway_order_id, booking.id
            );
            return Ok(Self::response(state, tx));
        }

        let driver_id = booking.driver_id.ok_or_else(|| {
            ApiError::Validation("Booking has no assigned driver yet".into())
        })?;

        let split = CommissionService::split(
            booking.fare,
            state.config.commission.commission_bps,
            state.config.commission.gst_bps,
        )?;

        // Gateway first: an order-create failure must leave nothing behind.
        // The receipt is deterministic per booking so a gateway-side retry
        // cannot mint a second order.
        let receipt = format!("bk-{}", booking.id.simple());
        let order = state
            .razorpay
            .create_order(booking.fare, &state.config.currency, &receipt)
            .await?;

        let created = conn.transaction::<_, ApiError, _>(|conn| {
            let tx = TransactionRepository::create(
                conn,
                NewTransaction {
                    booking_id: booking.id,
                    passenger_id,
                    driver_id,
                    gateway_order_id: &order.id,
                    amount: booking.fare,
                    base_commission_amount: split.base_commission,
                    commission_bps: state.config.commission.commission_bps,
                    gst_amount: split.gst,
                    gst_bps: state.config.commission.gst_bps,
                    platform_total: split.platform_total,
                    driver_net_amount: split.driver_net,
                    payment_status: PaymentStatus::Created,
                    payout_status: SettlementStatus::Pending,
                },
            )?;

            BookingRepository::set_payment_status(conn, booking.id, BookingPaymentStatus::Pending)?;

            Ok(tx)
        });

        let tx = match created {
            Ok(tx) => tx,
            // The one-active-charge index fired: a concurrent submit won the
            // insert, so hand back its row.
            Err(ApiError::Database(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ))) => TransactionRepository::find_active_by_booking(&mut conn, booking.id)?
                .ok_or_else(|| {
                    ApiError::Internal("Active transaction vanished after conflict".into())
                })?,
            Err(e) => return Err(e),
        };

        info!(
            "Opened charge intent {} for booking {} ({} {})",
            tx.gateway_order_id, booking.id, tx.amount, state.config.currency
        );

        Ok(Self::response(state, tx))
    }

    fn response(state: &AppState, tx: Transaction) -> CreateOrderResponse {
        CreateOrderResponse {
            order_id: tx.gateway_order_id,
            transaction_id: tx.id,
            amount: tx.amount,
            currency: state.config.currency.clone(),
            key_id: state.config.razorpay_details.razorpay_key_id.clone(),
        }
    }
}
