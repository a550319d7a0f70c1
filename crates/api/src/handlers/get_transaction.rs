use axum::extract::{Extension, Path, State};
use axum::Json;
use sawari_core::security::Claims;
use sawari_core::services::transaction_service::TransactionService;
use sawari_core::AppState;
use sawari_primitives::error::{ApiError, ApiErrorResponse};
use sawari_primitives::models::dtos::transaction_dto::TransactionDto;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/transactions/{transaction_id}",
    tag = "Transactions",
    summary = "Ledger view of one charge and its settlement progress",
    params(("transaction_id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction found", body = TransactionDto),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 403, description = "Transaction belongs to another user", body = ApiErrorResponse),
        (status = 404, description = "Transaction not found", body = ApiErrorResponse)
    ),
    security(("bearerAuth" = [])),
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<TransactionDto>, ApiError> {
    let user_id = claims.user_id()?;

    let dto = TransactionService::get_for_user(&state, user_id, transaction_id)?;

    Ok(Json(dto))
}
