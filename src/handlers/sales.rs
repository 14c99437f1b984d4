use crate::{
    errors::ServiceError,
    handlers::AppState,
    services::sales::{SalesBatch, SalesBatchResult},
    ApiResponse,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

/// Upload a batch of daily sales
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    request_body = SalesBatch,
    responses(
        (status = 201, description = "Sales recorded", body = ApiResponse<SalesBatchResult>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Company not in the group", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "sales"
)]
pub async fn record_sales(
    State(state): State<AppState>,
    payload: Result<Json<SalesBatch>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SalesBatchResult>>), ServiceError> {
    let Json(batch) = payload?;
    let result = state.services.sales.record_batch(batch).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}
