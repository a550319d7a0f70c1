use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use sawari_core::AppState;
use sawari_primitives::models::dtos::health_dto::HealthStatus;
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus),
        (status = 503, description = "Service is unhealthy", body = HealthStatus)
    ),
    security(()),
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    match state.db.get() {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn) {
            Ok(_) => Json(HealthStatus {
                status: StatusCode::OK.to_string(),
                message: "API is healthy".to_string(),
            }),
            Err(e) => {
                error!("Health check DB query failed: {}", e);
                Json(HealthStatus {
                    status: StatusCode::SERVICE_UNAVAILABLE.to_string(),
                    message: "Health check DB query failed".to_string(),
                })
            }
        },
        Err(e) => {
            error!("Health check DB connection failed: {}", e);
            Json(HealthStatus {
                status: StatusCode::SERVICE_UNAVAILABLE.to_string(),
                message: "Health check DB connection failed".to_string(),
            })
        }
    }
}
