use axum::extract::{Extension, Path, State};
use axum::Json;
use sawari_core::services::driver_account_service::{
    ApiError, AppState, DriverAccountService, SetupDriverResponse,
};
use sawari_core::security::Claims;
use sawari_primitives::error::ApiErrorResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/drivers/{driver_id}/payout_account",
    tag = "Drivers",
    summary = "Provision the driver's payout destination",
    description = "Idempotent one-time setup: creates the gateway contact and fund \
                   destination on first call, returns the stored identifiers thereafter.",
    params(("driver_id" = Uuid, Path, description = "Driver id")),
    responses(
        (status = 200, description = "Payout account ready", body = SetupDriverResponse),
        (status = 400, description = "Driver has no payout destination on file", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 403, description = "Callers may only set up their own account", body = ApiErrorResponse),
        (status = 404, description = "Driver not found", body = ApiErrorResponse),
        (status = 502, description = "Gateway refused the provisioning call", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn setup_driver(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<SetupDriverResponse>, ApiError> {
    let caller = claims.user_id()?;

    if caller != driver_id {
        return Err(ApiError::Forbidden(
            "Payout accounts can only be set up by their driver".into(),
        ));
    }

    let response = DriverAccountService::setup_driver(&state, driver_id).await?;

    Ok(Json(response))
}
