pub mod booking;
pub mod driver_payout_account;
pub mod enum_types;
pub mod payout;
pub mod transaction;
pub mod user;
