pub use crate::app_state::AppState;
use crate::repositories::driver_account_repository::DriverAccountRepository;
use crate::repositories::user_repository::UserRepository;
pub use sawari_primitives::{
    error::ApiError,
    models::dtos::driver_dto::SetupDriverResponse,
    models::entities::driver_payout_account::{DriverPayoutAccount, NewDriverPayoutAccount},
};
use tracing::info;
use uuid::Uuid;

pub struct DriverAccountService;

impl DriverAccountService {
    /// One-time payout-destination setup, idempotent per driver.
    pub async fn setup_driver(
        state: &AppState,
        driver_id: Uuid,
    ) -> Result<SetupDriverResponse, ApiError> {
        let account = Self::ensure_account(state, driver_id).await?;

        Ok(SetupDriverResponse {
            verified: account.verified,
            contact_id: account.gateway_contact_id,
            fund_account_id: account.gateway_fund_account_id,
        })
    }

    /// Returns the driver's payout account, provisioning it lazily: gateway
    /// contact first, then the fund destination, then one upsert holding
    /// both ids.
    pub async fn ensure_account(
        state: &AppState,
        driver_id: Uuid,
    ) -> Result<DriverPayoutAccount, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        if let Some(account) = DriverAccountRepository::find_by_driver(&mut conn, driver_id)? {
            if !account.active {
                return Err(ApiError::Validation(
                    "Driver payout account is deactivated".into(),
                ));
            }
            if !account.verified {
                return Err(ApiError::Validation(
                    "Driver payout account could not be verified".into(),
                ));
            }
            return Ok(account);
        }

        let driver = UserRepository::find_by_id(&mut conn, driver_id)?
            .ok_or_else(|| ApiError::NotFound("Driver not found".into()))?;

        let vpa = driver
            .upi_vpa
            .as_deref()
            .ok_or_else(|| ApiError::Validation("Driver has no payout destination on file".into()))?;

        let reference_id = driver.id.simple().to_string();
        let contact = state
            .razorpay
            .create_contact(&driver.full_name, &driver.email, &driver.phone, &reference_id)
            .await?;

        let fund_account = state.razorpay.create_fund_account(&contact.id, vpa).await?;

        let account = DriverAccountRepository::upsert(
            &mut conn,
            NewDriverPayoutAccount {
                driver_id,
                gateway_contact_id: &contact.id,
                gateway_fund_account_id: &fund_account.id,
                verified: true,
                active: true,
            },
        )?;

        info!(
            "Provisioned payout account for driver {} (contact {}, fund account {})",
            driver_id, account.gateway_contact_id, account.gateway_fund_account_id
        );

        Ok(account)
    }
}
