use crate::{
    handlers::AppState, services::raw_materials::RawMaterialNode, ApiResponse, ApiResult,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RawMaterialTreeQuery {
    pub group_id: Uuid,
    pub company_id: Option<Uuid>,
    /// Case-insensitive name filter
    pub search: Option<String>,
}

/// Two-level raw material hierarchy
#[utoipa::path(
    get,
    path = "/api/v1/raw-materials/tree",
    params(RawMaterialTreeQuery),
    responses(
        (status = 200, description = "Raw material tree", body = ApiResponse<Vec<RawMaterialNode>>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "raw-materials"
)]
pub async fn raw_material_tree(
    State(state): State<AppState>,
    query: Result<Query<RawMaterialTreeQuery>, QueryRejection>,
) -> ApiResult<Vec<RawMaterialNode>> {
    let Query(query) = query?;
    let tree = state
        .services
        .raw_materials
        .tree(query.group_id, query.company_id, query.search)
        .await?;
    Ok(Json(ApiResponse::success(tree)))
}
