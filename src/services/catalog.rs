use crate::{
    entities::resale_product::{self, Entity as ResaleProductEntity},
    errors::ServiceError,
    projection::StockStatus,
    services::{company_scope, normalize_search},
};
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

/// Resale product with its derived stock status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResaleProductView {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub sku: Option<String>,
    pub current_stock: f64,
    pub min_stock: f64,
    pub conversion_factor: f64,
    pub purchase_unit: Option<String>,
    pub stock_status: StockStatus,
}

impl From<resale_product::Model> for ResaleProductView {
    fn from(model: resale_product::Model) -> Self {
        Self {
            stock_status: StockStatus::classify(model.current_stock, model.min_stock),
            id: model.id,
            company_id: model.company_id,
            name: model.name,
            sku: model.sku,
            current_stock: model.current_stock,
            min_stock: model.min_stock,
            conversion_factor: model.conversion_factor,
            purchase_unit: model.purchase_unit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResaleProductFilter {
    pub group_id: Uuid,
    pub company_id: Option<Uuid>,
    pub search: Option<String>,
    pub stock_status: Option<StockStatus>,
}

impl ResaleProductFilter {
    /// Active products of the group matching every filter, ordered by name.
    fn query(&self) -> Select<ResaleProductEntity> {
        let mut query = ResaleProductEntity::find()
            .filter(resale_product::Column::GroupId.eq(self.group_id))
            .filter(resale_product::Column::Active.eq(true))
            .filter(company_scope(resale_product::Column::CompanyId, self.company_id));

        if let Some(term) = normalize_search(self.search.as_deref()) {
            let pattern = format!("%{}%", escape_like(&term));
            query = query.filter(
                Condition::any()
                    .add(lower_like(resale_product::Column::Name, &pattern))
                    .add(lower_like(resale_product::Column::Sku, &pattern)),
            );
        }

        if let Some(status) = self.stock_status {
            query = query.filter(stock_status_condition(status));
        }

        query
            .order_by_asc(resale_product::Column::Name)
            .order_by_asc(resale_product::Column::Id)
    }
}

/// SQL form of [`StockStatus::classify`].
fn stock_status_condition(status: StockStatus) -> Condition {
    let stock = || Expr::col((ResaleProductEntity, resale_product::Column::CurrentStock));
    let min_stock = || Expr::col((ResaleProductEntity, resale_product::Column::MinStock));

    match status {
        StockStatus::Out => Condition::all().add(stock().lte(0.0)),
        StockStatus::Low => Condition::all()
            .add(stock().gt(0.0))
            .add(stock().lt(min_stock())),
        StockStatus::Ok => Condition::all()
            .add(stock().gt(0.0))
            .add(stock().gte(min_stock())),
    }
}

fn lower_like(column: resale_product::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((ResaleProductEntity, column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists active resale products ordered by name.
    ///
    /// Returns one page plus the total number of matches.
    #[instrument(skip(self))]
    pub async fn list_resale_products(
        &self,
        filter: &ResaleProductFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ResaleProductView>, u64), ServiceError> {
        let paginator = filter.query().paginate(&*self.db, per_page);
        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Database error when counting resale products");
            ServiceError::DatabaseError(e)
        })?;

        let products = paginator.fetch_page(page - 1).await.map_err(|e| {
            error!(page, per_page, error = %e, "Database error when fetching resale products");
            ServiceError::DatabaseError(e)
        })?;

        Ok((products.into_iter().map(ResaleProductView::from).collect(), total))
    }
}
