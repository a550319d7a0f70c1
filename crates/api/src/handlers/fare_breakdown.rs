use axum::extract::{Query, State};
use axum::Json;
use sawari_core::services::commission_service::CommissionService;
use sawari_core::AppState;
use sawari_primitives::error::{ApiError, ApiErrorResponse};
use sawari_primitives::models::dtos::commission_dto::FareBreakdownResponse;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FareBreakdownParams {
    /// Fare in minor units (paise).
    pub fare: i64,
    /// Override the configured commission rate, basis points.
    pub commission_bps: Option<i64>,
    /// Override the configured GST rate, basis points.
    pub gst_bps: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/fares/breakdown",
    tag = "Fares",
    summary = "Preview the commission split for a fare",
    params(FareBreakdownParams),
    responses(
        (status = 200, description = "Split that balances exactly to the fare", body = FareBreakdownResponse),
        (status = 400, description = "Non-positive fare or out-of-range rate", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn fare_breakdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FareBreakdownParams>,
) -> Result<Json<FareBreakdownResponse>, ApiError> {
    let commission_bps = params
        .commission_bps
        .unwrap_or(state.config.commission.commission_bps);
    let gst_bps = params.gst_bps.unwrap_or(state.config.commission.gst_bps);

    let split = CommissionService::split(params.fare, commission_bps, gst_bps)?;

    Ok(Json(FareBreakdownResponse::from_split(params.fare, split)))
}
