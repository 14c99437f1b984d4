use crate::{
    errors::ServiceError,
    handlers::{
        common::{PaginatedResponse, PaginationParams},
        AppState,
    },
    projection::StockStatus,
    services::catalog::{ResaleProductFilter, ResaleProductView},
    ApiResponse, ApiResult,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResaleProductQuery {
    pub group_id: Uuid,
    pub company_id: Option<Uuid>,
    /// Matches name or SKU, case-insensitive
    pub search: Option<String>,
    /// `out`, `low` or `ok`
    pub stock_status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl ResaleProductQuery {
    fn filter(&self) -> Result<ResaleProductFilter, ServiceError> {
        let stock_status = match self.stock_status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(StockStatus::from_str(raw).map_err(|_| {
                ServiceError::ValidationError(format!(
                    "stock_status must be one of out, low, ok; got '{}'",
                    raw
                ))
            })?),
        };

        Ok(ResaleProductFilter {
            group_id: self.group_id,
            company_id: self.company_id,
            search: self.search.clone(),
            stock_status,
        })
    }
}

/// Paginated resale product listing
#[utoipa::path(
    get,
    path = "/api/v1/resale-products",
    params(ResaleProductQuery),
    responses(
        (status = 200, description = "Resale products", body = ApiResponse<PaginatedResponse<ResaleProductView>>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn list_resale_products(
    State(state): State<AppState>,
    query: Result<Query<ResaleProductQuery>, QueryRejection>,
) -> ApiResult<PaginatedResponse<ResaleProductView>> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let (page, per_page) = PaginationParams {
        page: query.page,
        per_page: query.per_page,
    }
    .resolve(&state.config)?;

    let (items, total) = state
        .services
        .catalog
        .list_resale_products(&filter, page, per_page)
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, page, per_page, total,
    ))))
}
