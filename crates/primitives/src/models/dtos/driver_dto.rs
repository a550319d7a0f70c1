use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SetupDriverResponse {
    pub verified: bool,
    pub contact_id: String,
    pub fund_account_id: String,
}
