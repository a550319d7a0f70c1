pub mod app_config;
pub mod commission_details;
pub mod jwt_details;
pub mod payout_details;
pub mod razorpay_details;

pub use app_config::AppConfig;
pub use commission_details::CommissionInfo;
pub use jwt_details::JWTInfo;
pub use payout_details::PayoutInfo;
pub use razorpay_details::RazorpayInfo;
