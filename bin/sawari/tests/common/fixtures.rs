use chrono::Utc;
use diesel::prelude::*;
use sawari_core::services::commission_service::CommissionService;
use sawari_primitives::models::entities::enum_types::{
    BookingPaymentStatus, BookingStatus, PaymentStatus, PayoutMode, PayoutStatus, SettlementStatus,
};
use sawari_primitives::schema::{bookings, driver_payout_accounts, payouts, transactions, users};
use uuid::Uuid;

pub fn create_user(conn: &mut PgConnection, name: &str, upi_vpa: Option<&str>) -> Uuid {
    let id = Uuid::new_v4();

    diesel::insert_into(users::table)
        .values((
            users::id.eq(id),
            users::full_name.eq(name),
            users::email.eq(format!("{}-{}@example.com", name, id.simple())),
            users::phone.eq("+919800000000"),
            users::upi_vpa.eq(upi_vpa),
        ))
        .execute(conn)
        .expect("Failed to insert user");

    id
}

pub fn create_booking(
    conn: &mut PgConnection,
    passenger_id: Uuid,
    driver_id: Option<Uuid>,
    fare: i64,
) -> Uuid {
    let id = Uuid::new_v4();

    diesel::insert_into(bookings::table)
        .values((
            bookings::id.eq(id),
            bookings::passenger_id.eq(passenger_id),
            bookings::driver_id.eq(driver_id),
            bookings::fare.eq(fare),
            bookings::status.eq(BookingStatus::Confirmed),
            bookings::payment_status.eq(BookingPaymentStatus::Unpaid),
        ))
        .execute(conn)
        .expect("Failed to insert booking");

    id
}

pub fn mark_booking_paid(conn: &mut PgConnection, booking_id: Uuid) {
    diesel::update(bookings::table.find(booking_id))
        .set(bookings::payment_status.eq(BookingPaymentStatus::Paid))
        .execute(conn)
        .expect("Failed to mark booking paid");
}

/// Insert a ledger transaction with a balanced commission split, in the
/// given payment state.
pub fn create_transaction(
    conn: &mut PgConnection,
    booking_id: Uuid,
    passenger_id: Uuid,
    driver_id: Uuid,
    fare: i64,
    payment_status: PaymentStatus,
) -> Uuid {
    let id = Uuid::new_v4();
    let split = CommissionService::split(fare, 1000, 1800).expect("Fixture fare must split");

    let captured_at = (payment_status == PaymentStatus::Captured).then(Utc::now);
    let gateway_payment_id =
        (payment_status == PaymentStatus::Captured).then(|| format!("pay_{}", id.simple()));

    diesel::insert_into(transactions::table)
        .values((
            transactions::id.eq(id),
            transactions::booking_id.eq(booking_id),
            transactions::passenger_id.eq(passenger_id),
            transactions::driver_id.eq(driver_id),
            transactions::gateway_order_id.eq(format!("order_{}", id.simple())),
            transactions::gateway_payment_id.eq(gateway_payment_id),
            transactions::amount.eq(fare),
            transactions::base_commission_amount.eq(split.base_commission),
            transactions::commission_bps.eq(1000),
            transactions::gst_amount.eq(split.gst),
            transactions::gst_bps.eq(1800),
            transactions::platform_total.eq(split.platform_total),
            transactions::driver_net_amount.eq(split.driver_net),
            transactions::payment_status.eq(payment_status),
            transactions::payout_status.eq(SettlementStatus::Pending),
            transactions::captured_at.eq(captured_at),
        ))
        .execute(conn)
        .expect("Failed to insert transaction");

    id
}

pub fn set_transaction_payout_status(
    conn: &mut PgConnection,
    transaction_id: Uuid,
    status: SettlementStatus,
) {
    diesel::update(transactions::table.find(transaction_id))
        .set(transactions::payout_status.eq(status))
        .execute(conn)
        .expect("Failed to set payout status");
}

#[allow(clippy::too_many_arguments)]
pub fn create_payout(
    conn: &mut PgConnection,
    transaction_id: Uuid,
    driver_id: Uuid,
    booking_id: Uuid,
    amount: i64,
    status: PayoutStatus,
    retry_count: i32,
    max_retries: i32,
) -> (Uuid, String) {
    let id = Uuid::new_v4();
    let gateway_payout_id = format!("pout_{}", id.simple());

    diesel::insert_into(payouts::table)
        .values((
            payouts::id.eq(id),
            payouts::transaction_id.eq(transaction_id),
            payouts::driver_id.eq(driver_id),
            payouts::booking_id.eq(booking_id),
            payouts::amount.eq(amount),
            payouts::gateway_payout_id.eq(&gateway_payout_id),
            payouts::status.eq(status),
            payouts::mode.eq(PayoutMode::Imps),
            payouts::retry_count.eq(retry_count),
            payouts::max_retries.eq(max_retries),
        ))
        .execute(conn)
        .expect("Failed to insert payout");

    (id, gateway_payout_id)
}

pub fn create_driver_account(conn: &mut PgConnection, driver_id: Uuid) {
    diesel::insert_into(driver_payout_accounts::table)
        .values((
            driver_payout_accounts::driver_id.eq(driver_id),
            driver_payout_accounts::gateway_contact_id.eq(format!("cont_{}", driver_id.simple())),
            driver_payout_accounts::gateway_fund_account_id
                .eq(format!("fa_{}", driver_id.simple())),
            driver_payout_accounts::verified.eq(true),
            driver_payout_accounts::active.eq(true),
        ))
        .execute(conn)
        .expect("Failed to insert driver payout account");
}
