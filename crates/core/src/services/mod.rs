pub mod commission_service;
pub mod driver_account_service;
pub mod order_service;
pub mod payout_service;
pub mod transaction_service;
pub mod verification_service;
pub mod webhook_service;
