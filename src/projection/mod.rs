//! Purchase projection calculator.
//!
//! Everything in this module is a pure function of its inputs: history points
//! and stock snapshots go in, a [`ProjectionResult`] comes out. Loading those
//! snapshots from the database is the job of
//! [`crate::services::projection::ProjectionService`].

pub mod calendar;
pub mod history;
pub mod projector;
pub mod purchase;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

pub use calendar::{HolidayCalendar, HolidayLookup};
pub use history::{aggregate_history, DayAverages, HistoricalSalesPoint, HistorySummary};
pub use projector::{project_days, projected_consumption, ProjectionDay, ProjectionWindow};
pub use purchase::{resolve_purchase, PurchasePlan, PurchaseRounding, StockPosition, StockStatus};

/// Demand model used when walking the projection window.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProjectionType {
    /// Flat daily average over the whole history window.
    Linear,
    /// Day-of-week and holiday aware averages.
    #[default]
    Weekly,
}

/// Stock snapshot of one projected item.
#[derive(Debug, Clone, Default)]
pub struct ProjectionItem {
    pub item_id: Uuid,
    pub item_name: String,
    pub current_stock: Option<f64>,
    pub min_stock: Option<f64>,
    pub conversion_factor: Option<f64>,
    pub purchase_unit: Option<String>,
}

/// Projection outcome for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectionResult {
    pub item_id: Uuid,
    pub item_name: String,
    pub total_history_sales: f64,
    pub avg_daily_sales: f64,
    pub averages_by_day: DayAverages,
    pub daily_projection: Vec<ProjectionDay>,
    /// Always the in-order sum of `daily_projection[].projected`.
    pub projected_consumption: f64,
    pub current_stock: f64,
    pub min_stock: f64,
    pub conversion_factor: f64,
    pub purchase_unit: Option<String>,
    pub purchase_need: f64,
    pub purchase_quantity: f64,
    pub needs_purchase: bool,
    pub stock_status: StockStatus,
}

/// Runs the three calculator stages for a single item.
pub fn project_item<C: HolidayLookup + ?Sized>(
    item: ProjectionItem,
    history: &[HistoricalSalesPoint],
    history_days: u32,
    window: ProjectionWindow,
    projection_type: ProjectionType,
    calendar: &C,
    rounding: PurchaseRounding,
) -> ProjectionResult {
    let summary = aggregate_history(history, history_days);
    let daily_projection = project_days(window, projection_type, &summary, calendar);
    let consumption = projected_consumption(&daily_projection);

    let position = StockPosition::from_options(
        item.current_stock,
        item.min_stock,
        item.conversion_factor,
    );
    let plan = resolve_purchase(consumption, &position, rounding);

    ProjectionResult {
        item_id: item.item_id,
        item_name: item.item_name,
        total_history_sales: summary.total_history_sales,
        avg_daily_sales: summary.avg_daily_sales,
        averages_by_day: summary.averages,
        daily_projection,
        projected_consumption: consumption,
        current_stock: position.current_stock,
        min_stock: position.min_stock,
        conversion_factor: position.conversion_factor,
        purchase_unit: item.purchase_unit,
        purchase_need: plan.purchase_need,
        purchase_quantity: plan.purchase_quantity,
        needs_purchase: plan.needs_purchase,
        stock_status: plan.stock_status,
    }
}

/// Aggregate view over a batch of projection results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectionSummary {
    pub total_items: usize,
    pub items_needing_purchase: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub total_projected_consumption: f64,
    pub projection_type: ProjectionType,
    pub projection_days: u32,
    pub history_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ProjectionSummary {
    pub fn from_results(
        results: &[ProjectionResult],
        projection_type: ProjectionType,
        history_days: u32,
        window: ProjectionWindow,
    ) -> Self {
        let count_status =
            |status: StockStatus| results.iter().filter(|r| r.stock_status == status).count();

        Self {
            total_items: results.len(),
            items_needing_purchase: results.iter().filter(|r| r.needs_purchase).count(),
            out_of_stock: count_status(StockStatus::Out),
            low_stock: count_status(StockStatus::Low),
            total_projected_consumption: results
                .iter()
                .fold(0.0, |acc, r| acc + r.projected_consumption),
            projection_type,
            projection_days: window.days,
            history_days,
            start_date: window.start,
            end_date: window.end_date(),
        }
    }
}
