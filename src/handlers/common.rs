use crate::{config::AppConfig, errors::ServiceError};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input.validate().map_err(ServiceError::from)
}

/// Pagination parameters for list operations
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, IntoParams)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Items per page, capped by configuration
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// Resolves defaults and caps against the configured page sizes.
    pub fn resolve(&self, config: &AppConfig) -> Result<(u64, u64), ServiceError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ServiceError::ValidationError(
                "page must be at least 1".to_string(),
            ));
        }

        let per_page = self
            .per_page
            .unwrap_or(u64::from(config.api_default_page_size));
        if per_page == 0 {
            return Err(ServiceError::ValidationError(
                "per_page must be at least 1".to_string(),
            ));
        }

        Ok((page, per_page.min(u64::from(config.api_max_page_size))))
    }
}

/// Standard pagination response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if total == 0 || per_page == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Standard paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(page, per_page, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn config() -> AppConfig {
        AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            "development".into(),
        )
    }

    #[test]
    fn pagination_defaults_and_caps() {
        let cfg = config();
        assert_eq!(PaginationParams::default().resolve(&cfg).unwrap(), (1, 20));

        let large = PaginationParams {
            page: Some(2),
            per_page: Some(10_000),
        };
        assert_eq!(large.resolve(&cfg).unwrap(), (2, 100));

        let zero = PaginationParams {
            page: Some(0),
            per_page: None,
        };
        assert_matches!(zero.resolve(&cfg), Err(ServiceError::ValidationError(_)));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 20, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 20, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 20, 21).total_pages, 2);
    }
}
