use crate::{
    errors::ServiceError,
    handlers::{common::validate_input, AppState},
    services::holidays::{CreateHolidayInput, Holiday},
    ApiResponse, ApiResult,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HolidayQuery {
    pub group_id: Uuid,
}

/// Holidays of a tenant ordered by date
#[utoipa::path(
    get,
    path = "/api/v1/holidays",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Holiday calendar", body = ApiResponse<Vec<Holiday>>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "holidays"
)]
pub async fn list_holidays(
    State(state): State<AppState>,
    query: Result<Query<HolidayQuery>, QueryRejection>,
) -> ApiResult<Vec<Holiday>> {
    let Query(query) = query?;
    let holidays = state.services.holidays.list(query.group_id).await?;
    Ok(Json(ApiResponse::success(holidays)))
}

/// Register a holiday
#[utoipa::path(
    post,
    path = "/api/v1/holidays",
    request_body = CreateHolidayInput,
    responses(
        (status = 201, description = "Holiday created", body = ApiResponse<Holiday>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "holidays"
)]
pub async fn create_holiday(
    State(state): State<AppState>,
    payload: Result<Json<CreateHolidayInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Holiday>>), ServiceError> {
    let Json(input) = payload?;
    validate_input(&input)?;
    let holiday = state.services.holidays.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(holiday))))
}
