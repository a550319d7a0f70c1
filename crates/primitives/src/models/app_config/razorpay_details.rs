use eyre::Report;
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct RazorpayInfo {
    pub razorpay_key_id: String,
    pub razorpay_key_secret: SecretString,
    pub razorpay_api_url: String,
    pub razorpay_webhook_secret: SecretString,
    /// RazorpayX source account debited for driver payouts.
    pub razorpay_account_number: String,
}

impl RazorpayInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            razorpay_key_id: env::var("RAZORPAY_KEY_ID")?,
            razorpay_key_secret: SecretString::new(Box::from(env::var("RAZORPAY_KEY_SECRET")?)),
            razorpay_api_url: env::var("RAZORPAY_API_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com".into()),
            razorpay_webhook_secret: SecretString::new(Box::from(env::var(
                "RAZORPAY_WEBHOOK_SECRET",
            )?)),
            razorpay_account_number: env::var("RAZORPAY_ACCOUNT_NUMBER")?,
        })
    }
}
