pub mod catalog;
pub mod common;
pub mod health;
pub mod holidays;
pub mod projection;
pub mod raw_materials;
pub mod sales;

use crate::{
    config::AppConfig,
    db::DbPool,
    services::{
        catalog::CatalogService, holidays::HolidayService, projection::ProjectionService,
        raw_materials::RawMaterialService, sales::SalesService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub projection: Arc<ProjectionService>,
    pub catalog: Arc<CatalogService>,
    pub raw_materials: Arc<RawMaterialService>,
    pub sales: Arc<SalesService>,
    pub holidays: Arc<HolidayService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        Self {
            projection: Arc::new(ProjectionService::new(db_pool.clone())),
            catalog: Arc::new(CatalogService::new(db_pool.clone())),
            raw_materials: Arc::new(RawMaterialService::new(db_pool.clone())),
            sales: Arc::new(SalesService::new(db_pool.clone(), config.max_sales_batch)),
            holidays: Arc::new(HolidayService::new(db_pool)),
        }
    }
}
