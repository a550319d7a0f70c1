use serde::Serialize;
use utoipa::ToSchema;

/// Fare split in minor units. The four fields always satisfy
/// `base_commission + gst + driver_net == total` for the fare they were
/// computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommissionSplit {
    pub base_commission: i64,
    pub gst: i64,
    pub platform_total: i64,
    pub driver_net: i64,
}

/// Presentation shape: 2-decimal major units.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdownResponse {
    pub passenger_pays: f64,
    pub platform_commission: f64,
    pub gst_on_commission: f64,
    pub platform_keeps: f64,
    pub driver_receives: f64,
}

impl FareBreakdownResponse {
    pub fn from_split(total_fare: i64, split: CommissionSplit) -> Self {
        Self {
            passenger_pays: to_major(total_fare),
            platform_commission: to_major(split.base_commission),
            gst_on_commission: to_major(split.gst),
            platform_keeps: to_major(split.platform_total),
            driver_receives: to_major(split.driver_net),
        }
    }
}

/// Minor units to 2-decimal major units, presentation only.
pub fn to_major(minor: i64) -> f64 {
    minor as f64 / 100.0
}
