use crate::{
    entities::{
        daily_sale::{self, Entity as DailySaleEntity},
        product_raw_material::{self, Entity as ProductRawMaterialEntity},
        raw_material::{self, Entity as RawMaterialEntity},
        resale_product::{self, Entity as ResaleProductEntity},
    },
    errors::ServiceError,
    projection::{
        project_item, HistoricalSalesPoint, HolidayCalendar, HolidayLookup, ProjectionItem,
        ProjectionResult, ProjectionSummary, ProjectionType, ProjectionWindow, PurchaseRounding,
    },
    services::{company_scope, holidays::HolidayService},
};
use chrono::{Duration, NaiveDate};
use metrics::{counter, histogram};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-product, per-day sold quantities.
type DailyTotals = HashMap<Uuid, HashMap<NaiveDate, f64>>;

/// Fully resolved projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionRequest {
    pub group_id: Uuid,
    pub company_id: Option<Uuid>,
    pub projection_type: ProjectionType,
    pub projection_days: u32,
    pub history_days: u32,
    /// "Today". History ends the day before, projection starts the day after.
    pub reference_date: NaiveDate,
}

impl ProjectionRequest {
    /// Rejects reference dates whose windows fall outside the representable
    /// calendar. Must pass before either window is computed.
    pub fn check_date_range(&self) -> Result<(), ServiceError> {
        let history_start = self
            .reference_date
            .checked_sub_signed(Duration::days(i64::from(self.history_days)));
        let projection_end = self
            .reference_date
            .checked_add_signed(Duration::days(i64::from(self.projection_days)));

        if history_start.is_none() || projection_end.is_none() {
            return Err(ServiceError::ValidationError(format!(
                "reference_date {} leaves the history or projection window outside the supported calendar",
                self.reference_date
            )));
        }
        Ok(())
    }

    /// The `history_days` days ending the day before `reference_date`.
    pub fn history_window(&self) -> ProjectionWindow {
        let start = self.reference_date - Duration::days(i64::from(self.history_days));
        ProjectionWindow::new(start, self.history_days)
    }

    pub fn projection_window(&self) -> ProjectionWindow {
        ProjectionWindow::new(self.reference_date + Duration::days(1), self.projection_days)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectionResponse {
    pub projection: Vec<ProjectionResult>,
    pub summary: ProjectionSummary,
}

/// Loads stock and sales snapshots and runs the projection calculator over them.
#[derive(Clone)]
pub struct ProjectionService {
    db: Arc<DatabaseConnection>,
    holidays: HolidayService,
}

impl ProjectionService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let holidays = HolidayService::new(db.clone());
        Self { db, holidays }
    }

    /// Projects every active resale product of the tenant.
    #[instrument(skip(self), fields(group_id = %request.group_id))]
    pub async fn project_resale(
        &self,
        request: ProjectionRequest,
    ) -> Result<ProjectionResponse, ServiceError> {
        request.check_date_range()?;
        let started = Instant::now();

        let products = ResaleProductEntity::find()
            .filter(resale_product::Column::GroupId.eq(request.group_id))
            .filter(resale_product::Column::Active.eq(true))
            .filter(company_scope(resale_product::Column::CompanyId, request.company_id))
            .order_by_asc(resale_product::Column::Name)
            .all(&*self.db)
            .await?;

        let projection = if products.is_empty() {
            Vec::new()
        } else {
            let calendar = self.holidays.calendar(request.group_id).await?;
            let product_ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
            let totals = self.load_daily_totals(&request, &product_ids).await?;

            products
                .into_iter()
                .map(|product| {
                    let daily = totals.get(&product.id);
                    let history = densify(&request, &calendar, |date| {
                        daily.and_then(|d| d.get(&date)).copied().unwrap_or(0.0)
                    });
                    run_item(&request, &calendar, resale_item(product), &history, PurchaseRounding::Ceil)
                })
                .collect()
        };

        Ok(self.finish("resale", &request, projection, started))
    }

    /// Projects every active raw material of the tenant from the sales of the
    /// resale products linked to it.
    #[instrument(skip(self), fields(group_id = %request.group_id))]
    pub async fn project_raw_materials(
        &self,
        request: ProjectionRequest,
    ) -> Result<ProjectionResponse, ServiceError> {
        request.check_date_range()?;
        let started = Instant::now();

        let materials = RawMaterialEntity::find()
            .filter(raw_material::Column::GroupId.eq(request.group_id))
            .filter(raw_material::Column::Active.eq(true))
            .filter(company_scope(raw_material::Column::CompanyId, request.company_id))
            .order_by_asc(raw_material::Column::Name)
            .all(&*self.db)
            .await?;

        let projection = if materials.is_empty() {
            Vec::new()
        } else {
            let material_ids: Vec<Uuid> = materials.iter().map(|m| m.id).collect();
            let links = self.load_links(&material_ids).await?;

            let mut product_ids: Vec<Uuid> = links
                .values()
                .flat_map(|linked| linked.iter().map(|(product_id, _)| *product_id))
                .collect();
            product_ids.sort_unstable();
            product_ids.dedup();

            let calendar = self.holidays.calendar(request.group_id).await?;
            let totals = self.load_daily_totals(&request, &product_ids).await?;

            materials
                .into_iter()
                .map(|material| {
                    let linked = links.get(&material.id).map(Vec::as_slice).unwrap_or(&[]);
                    let history = densify(&request, &calendar, |date| {
                        consumed_on(&totals, linked, date)
                    });
                    run_item(
                        &request,
                        &calendar,
                        raw_material_item(material),
                        &history,
                        PurchaseRounding::Exact,
                    )
                })
                .collect()
        };

        Ok(self.finish("raw_material", &request, projection, started))
    }

    /// Sums sales per product and day over the history window.
    async fn load_daily_totals(
        &self,
        request: &ProjectionRequest,
        product_ids: &[Uuid],
    ) -> Result<DailyTotals, ServiceError> {
        let mut totals = DailyTotals::new();
        if product_ids.is_empty() || request.history_days == 0 {
            return Ok(totals);
        }

        let window = request.history_window();
        let mut query = DailySaleEntity::find()
            .select_only()
            .column(daily_sale::Column::ProductId)
            .column(daily_sale::Column::SaleDate)
            .column(daily_sale::Column::Quantity)
            .filter(daily_sale::Column::GroupId.eq(request.group_id))
            .filter(daily_sale::Column::ProductId.is_in(product_ids.iter().copied()))
            .filter(daily_sale::Column::SaleDate.gte(window.start))
            .filter(daily_sale::Column::SaleDate.lte(window.end_date()));

        if let Some(company_id) = request.company_id {
            query = query.filter(daily_sale::Column::CompanyId.eq(company_id));
        }

        let rows: Vec<(Uuid, NaiveDate, f64)> = query.into_tuple().all(&*self.db).await?;
        debug!(rows = rows.len(), "Loaded sales history");

        for (product_id, sale_date, quantity) in rows {
            *totals
                .entry(product_id)
                .or_default()
                .entry(sale_date)
                .or_insert(0.0) += quantity;
        }

        Ok(totals)
    }

    /// Direct product links per raw material as `(product_id, quantity_per_unit)`.
    async fn load_links(
        &self,
        material_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<(Uuid, f64)>>, ServiceError> {
        let rows = ProductRawMaterialEntity::find()
            .filter(product_raw_material::Column::RawMaterialId.is_in(material_ids.iter().copied()))
            .all(&*self.db)
            .await?;

        let mut links: HashMap<Uuid, Vec<(Uuid, f64)>> = HashMap::new();
        for row in rows {
            links
                .entry(row.raw_material_id)
                .or_default()
                .push((row.product_id, row.quantity_per_unit));
        }
        Ok(links)
    }

    fn finish(
        &self,
        kind: &'static str,
        request: &ProjectionRequest,
        projection: Vec<ProjectionResult>,
        started: Instant,
    ) -> ProjectionResponse {
        let summary = ProjectionSummary::from_results(
            &projection,
            request.projection_type,
            request.history_days,
            request.projection_window(),
        );

        counter!("opsboard_projection.runs", 1, "kind" => kind);
        histogram!("opsboard_projection.duration", started.elapsed(), "kind" => kind);
        info!(
            kind,
            items = summary.total_items,
            needing_purchase = summary.items_needing_purchase,
            "Projection computed"
        );

        ProjectionResponse {
            projection,
            summary,
        }
    }
}

/// One point per history day; days without sales count as zero.
fn densify<F>(
    request: &ProjectionRequest,
    calendar: &HolidayCalendar,
    quantity_on: F,
) -> Vec<HistoricalSalesPoint>
where
    F: Fn(NaiveDate) -> f64,
{
    request
        .history_window()
        .dates()
        .map(|date| HistoricalSalesPoint::new(date, quantity_on(date), calendar.is_holiday(date)))
        .collect()
}

fn consumed_on(totals: &DailyTotals, linked: &[(Uuid, f64)], date: NaiveDate) -> f64 {
    linked
        .iter()
        .map(|(product_id, per_unit)| {
            let sold = totals
                .get(product_id)
                .and_then(|days| days.get(&date))
                .copied()
                .unwrap_or(0.0);
            sold * per_unit
        })
        .sum()
}

fn run_item(
    request: &ProjectionRequest,
    calendar: &HolidayCalendar,
    item: ProjectionItem,
    history: &[HistoricalSalesPoint],
    rounding: PurchaseRounding,
) -> ProjectionResult {
    project_item(
        item,
        history,
        request.history_days,
        request.projection_window(),
        request.projection_type,
        calendar,
        rounding,
    )
}

fn resale_item(product: resale_product::Model) -> ProjectionItem {
    ProjectionItem {
        item_id: product.id,
        item_name: product.name,
        current_stock: Some(product.current_stock),
        min_stock: Some(product.min_stock),
        conversion_factor: Some(product.conversion_factor),
        purchase_unit: product.purchase_unit,
    }
}

fn raw_material_item(material: raw_material::Model) -> ProjectionItem {
    ProjectionItem {
        item_id: material.id,
        item_name: material.name,
        current_stock: Some(material.current_stock),
        min_stock: Some(material.min_stock),
        conversion_factor: Some(material.conversion_factor),
        purchase_unit: material.purchase_unit,
    }
}
