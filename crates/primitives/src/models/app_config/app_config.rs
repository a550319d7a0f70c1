use crate::models::app_config::commission_details::CommissionInfo;
use crate::models::app_config::jwt_details::JWTInfo;
use crate::models::app_config::payout_details::PayoutInfo;
use crate::models::app_config::razorpay_details::RazorpayInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_details: JWTInfo,

    pub app_url: String,

    /// Settlement currency. Multi-currency settlement is out of scope, so
    /// this is a single value rather than a per-row column driver.
    pub currency: String,

    pub razorpay_details: RazorpayInfo,

    pub commission: CommissionInfo,

    pub payout: PayoutInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            jwt_details: JWTInfo::new()?,

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            currency: env::var("SETTLEMENT_CURRENCY").unwrap_or_else(|_| "INR".into()),

            razorpay_details: RazorpayInfo::new()?,

            commission: CommissionInfo::new()?,

            payout: PayoutInfo::new()?,
        })
    }
}
