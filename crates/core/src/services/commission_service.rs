use sawari_primitives::error::ApiError;
use sawari_primitives::models::dtos::commission_dto::CommissionSplit;

pub struct CommissionService;

impl CommissionService {
    /// Split a fare into platform commission, GST on that commission, and
    /// the driver's net share. All arithmetic is integer minor units.
    ///
    /// Commission and GST are rounded independently; the platform total is
    /// the sum of the two rounded values and the driver net is derived by
    /// subtraction from the fare, so the split always balances to the fare
    /// with no residual paisa.
    pub fn split(
        total_fare: i64,
        commission_bps: i64,
        gst_bps: i64,
    ) -> Result<CommissionSplit, ApiError> {
        if total_fare <= 0 {
            return Err(ApiError::Validation("Fare must be positive".into()));
        }
        if !(0..=10_000).contains(&commission_bps) || !(0..=10_000).contains(&gst_bps) {
            return Err(ApiError::Validation(
                "Rates must be between 0 and 10000 basis points".into(),
            ));
        }

        let base_commission = apply_bps(total_fare, commission_bps);
        let gst = apply_bps(base_commission, gst_bps);
        let platform_total = base_commission + gst;
        let driver_net = total_fare - platform_total;

        if driver_net < 0 {
            return Err(ApiError::Validation(
                "Commission and GST exceed the fare".into(),
            ));
        }

        Ok(CommissionSplit {
            base_commission,
            gst,
            platform_total,
            driver_net,
        })
    }
}

/// Round-half-up application of a basis-point rate, in integer space.
fn apply_bps(amount: i64, bps: i64) -> i64 {
    ((amount as i128 * bps as i128 + 5_000) / 10_000) as i64
}
