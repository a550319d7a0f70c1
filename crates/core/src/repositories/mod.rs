pub mod booking_repository;
pub mod driver_account_repository;
pub mod payout_repository;
pub mod transaction_repository;
pub mod user_repository;
