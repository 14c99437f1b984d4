use crate::{
    config::AppConfig,
    errors::ServiceError,
    handlers::AppState,
    projection::ProjectionType,
    services::projection::{ProjectionRequest, ProjectionResponse},
    ApiResponse, ApiResult,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;
use uuid::Uuid;

/// Query parameters shared by both projection endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectionQuery {
    /// Tenant whose items are projected
    pub group_id: Uuid,
    /// Restrict to one company; shared items are always included
    pub company_id: Option<Uuid>,
    /// Number of future days to project
    pub projection_days: Option<u32>,
    /// Number of past days of sales to learn from
    pub history_days: Option<u32>,
    /// `linear` or `weekly` (default)
    pub projection_type: Option<String>,
    /// Day treated as today (ISO date, defaults to the current UTC date)
    pub reference_date: Option<NaiveDate>,
}

impl ProjectionQuery {
    /// Applies configured defaults and bounds.
    pub fn resolve(
        &self,
        config: &AppConfig,
        today: NaiveDate,
    ) -> Result<ProjectionRequest, ServiceError> {
        let projection_days = self
            .projection_days
            .unwrap_or(config.default_projection_days);
        let history_days = self.history_days.unwrap_or(config.default_history_days);

        for (name, value) in [
            ("projection_days", projection_days),
            ("history_days", history_days),
        ] {
            if value == 0 || value > config.max_window_days {
                return Err(ServiceError::ValidationError(format!(
                    "{} must be between 1 and {}",
                    name, config.max_window_days
                )));
            }
        }

        let projection_type = match self.projection_type.as_deref().map(str::trim) {
            None | Some("") => ProjectionType::default(),
            Some(raw) => ProjectionType::from_str(raw).map_err(|_| {
                ServiceError::ValidationError(format!(
                    "projection_type must be 'linear' or 'weekly', got '{}'",
                    raw
                ))
            })?,
        };

        let request = ProjectionRequest {
            group_id: self.group_id,
            company_id: self.company_id,
            projection_type,
            projection_days,
            history_days,
            reference_date: self.reference_date.unwrap_or(today),
        };
        request.check_date_range()?;
        Ok(request)
    }
}

/// Purchase projection for resale products
#[utoipa::path(
    get,
    path = "/api/v1/projection/resale",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Projection computed", body = ApiResponse<ProjectionResponse>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "projection"
)]
pub async fn project_resale(
    State(state): State<AppState>,
    query: Result<Query<ProjectionQuery>, QueryRejection>,
) -> ApiResult<ProjectionResponse> {
    let Query(query) = query?;
    let request = query.resolve(&state.config, Utc::now().date_naive())?;
    let response = state.services.projection.project_resale(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// Purchase projection for raw materials, derived from linked product sales
#[utoipa::path(
    get,
    path = "/api/v1/projection/raw-materials",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Projection computed", body = ApiResponse<ProjectionResponse>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "projection"
)]
pub async fn project_raw_materials(
    State(state): State<AppState>,
    query: Result<Query<ProjectionQuery>, QueryRejection>,
) -> ApiResult<ProjectionResponse> {
    let Query(query) = query?;
    let request = query.resolve(&state.config, Utc::now().date_naive())?;
    let response = state.services.projection.project_raw_materials(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    fn config() -> AppConfig {
        AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            "development".into(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn defaults_come_from_config() {
        let query = ProjectionQuery {
            group_id: Uuid::new_v4(),
            ..Default::default()
        };

        let request = query.resolve(&config(), today()).unwrap();

        assert_eq!(request.projection_days, 7);
        assert_eq!(request.history_days, 30);
        assert_eq!(request.projection_type, ProjectionType::Weekly);
        assert_eq!(request.reference_date, today());
    }

    #[rstest]
    #[case::zero_projection(Some(0), None)]
    #[case::too_long_projection(Some(366), None)]
    #[case::zero_history(None, Some(0))]
    #[case::too_long_history(None, Some(1000))]
    fn out_of_range_windows_are_rejected(
        #[case] projection_days: Option<u32>,
        #[case] history_days: Option<u32>,
    ) {
        let query = ProjectionQuery {
            projection_days,
            history_days,
            ..Default::default()
        };
        assert_matches!(
            query.resolve(&config(), today()),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[rstest]
    #[case::latest_date(NaiveDate::MAX)]
    #[case::earliest_date(NaiveDate::MIN)]
    fn reference_dates_at_calendar_edges_are_rejected(#[case] reference_date: NaiveDate) {
        let query = ProjectionQuery {
            reference_date: Some(reference_date),
            ..Default::default()
        };
        assert_matches!(
            query.resolve(&config(), today()),
            Err(ServiceError::ValidationError(msg)) if msg.contains("reference_date")
        );
    }

    #[test]
    fn projection_type_is_parsed_leniently() {
        let mut query = ProjectionQuery {
            projection_type: Some(" Linear ".into()),
            ..Default::default()
        };
        assert_eq!(
            query.resolve(&config(), today()).unwrap().projection_type,
            ProjectionType::Linear
        );

        query.projection_type = Some("monthly".into());
        assert_matches!(
            query.resolve(&config(), today()),
            Err(ServiceError::ValidationError(msg)) if msg.contains("monthly")
        );
    }
}
