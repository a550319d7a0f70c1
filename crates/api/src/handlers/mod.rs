pub mod batch_payouts;
pub mod create_order;
pub mod fare_breakdown;
pub mod get_transaction;
pub mod health;
pub mod payment_webhook;
pub mod payout_webhook;
pub mod retry_payout;
pub mod setup_driver;
pub mod trigger_payout;
pub mod verify_payment;
