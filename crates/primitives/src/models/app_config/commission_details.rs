use eyre::Report;
use std::env;

/// Platform cut, in basis points. 1000 bps = 10% commission, 1800 bps = 18%
/// GST charged on that commission.
#[derive(Debug, Clone)]
pub struct CommissionInfo {
    pub commission_bps: i64,
    pub gst_bps: i64,
}

impl CommissionInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            commission_bps: env::var("COMMISSION_BPS")
                .unwrap_or_else(|_| "1000".into())
                .parse()?,
            gst_bps: env::var("GST_BPS").unwrap_or_else(|_| "1800".into()).parse()?,
        })
    }
}
