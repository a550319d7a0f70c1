use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct PayoutInfo {
    pub max_retries: i32,
    pub retry_backoff_secs: i64,
    pub sweep_batch_size: i64,
    pub sweep_interval_secs: u64,
}

impl PayoutInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            max_retries: env::var("PAYOUT_MAX_RETRIES")
                .unwrap_or_else(|_| "3".into())
                .parse()?,
            retry_backoff_secs: env::var("PAYOUT_RETRY_BACKOFF_SECS")
                .unwrap_or_else(|_| "3600".into())
                .parse()?,
            sweep_batch_size: env::var("PAYOUT_SWEEP_BATCH_SIZE")
                .unwrap_or_else(|_| "20".into())
                .parse()?,
            sweep_interval_secs: env::var("PAYOUT_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()?,
        })
    }
}
