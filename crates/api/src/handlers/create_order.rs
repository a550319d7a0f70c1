use axum::extract::{Extension, Json, State};
use sawari_core::services::order_service::{
    ApiError, AppState, Claims, CreateOrderRequest, CreateOrderResponse, OrderService,
};
use sawari_primitives::error::ApiErrorResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    summary = "Open a charge intent for a booking",
    description = "Creates a gateway order for the booking's fare and records the ledger \
                   transaction. Idempotent per booking: while a charge is live, re-submits \
                   return the same order instead of minting a new one.",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Charge intent opened (or idempotent re-issue)", body = CreateOrderResponse),
        (status = 400, description = "Booking has no assigned driver or fare is invalid", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 403, description = "Booking belongs to another passenger", body = ApiErrorResponse),
        (status = 404, description = "Booking not found", body = ApiErrorResponse),
        (status = 409, description = "Booking is already paid", body = ApiErrorResponse),
        (status = 502, description = "Gateway refused the order", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let passenger_id = claims.user_id()?;

    let response = OrderService::create_order(&state, passenger_id, req).await?;

    Ok(Json(response))
}
