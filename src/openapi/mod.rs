use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Opsboard API",
        version = "0.1.0",
        description = r#"
# Opsboard Purchase Projection API

Projects near-term consumption of resale products and raw materials from their
sales history and tells purchasing what to order.

## Projection

- `weekly` (default): averages per weekday, with holidays in their own bucket.
- `linear`: one flat daily average across the history window.

Resale purchase quantities are rounded up to whole purchasing units; raw
material quantities are reported unrounded.

## Error Handling

Failures return a consistent body:

```json
{
  "error": "Bad Request",
  "message": "Validation error: history_days must be between 1 and 365",
  "request_id": "3f0c...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "projection", description = "Purchase projection endpoints"),
        (name = "catalog", description = "Resale product listing"),
        (name = "raw-materials", description = "Raw material hierarchy"),
        (name = "sales", description = "Sales history ingestion"),
        (name = "holidays", description = "Holiday calendar"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::projection::project_resale,
        crate::handlers::projection::project_raw_materials,
        crate::handlers::catalog::list_resale_products,
        crate::handlers::raw_materials::raw_material_tree,
        crate::handlers::sales::record_sales,
        crate::handlers::holidays::list_holidays,
        crate::handlers::holidays::create_holiday,
        crate::handlers::health::liveness_check,
        crate::handlers::health::readiness_check,
    ),
    components(
        schemas(
            crate::projection::ProjectionResult,
            crate::projection::ProjectionSummary,
            crate::projection::ProjectionDay,
            crate::projection::DayAverages,
            crate::projection::ProjectionType,
            crate::projection::StockStatus,
            crate::services::projection::ProjectionResponse,
            crate::services::catalog::ResaleProductView,
            crate::services::raw_materials::RawMaterialNode,
            crate::services::raw_materials::RawMaterialSummary,
            crate::services::sales::SalesBatch,
            crate::services::sales::SaleEntry,
            crate::services::sales::SalesBatchResult,
            crate::services::holidays::Holiday,
            crate::services::holidays::CreateHolidayInput,
            crate::handlers::common::PaginationMeta,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_projection_endpoints() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Opsboard API"));
        assert!(json.contains("/api/v1/projection/resale"));
        assert!(json.contains("/api/v1/projection/raw-materials"));
        assert!(json.contains("/api/v1/sales"));
    }
}
