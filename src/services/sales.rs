use crate::{
    entities::{
        company::{self, Entity as CompanyEntity},
        daily_sale::{self, Entity as DailySaleEntity},
        resale_product::{self, Entity as ResaleProductEntity},
    },
    errors::ServiceError,
};
use chrono::{NaiveDate, Utc};
use metrics::counter;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[validate(schema(function = "validate_finite_quantity"))]
pub struct SaleEntry {
    pub product_id: Uuid,
    pub sale_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
}

/// A batch of daily sales for one tenant, optionally tied to a company.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SalesBatch {
    pub group_id: Uuid,
    pub company_id: Option<Uuid>,
    #[validate(length(min = 1))]
    #[validate]
    pub entries: Vec<SaleEntry>,
}

fn validate_finite_quantity(entry: &SaleEntry) -> Result<(), ValidationError> {
    if entry.quantity.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("finite");
        err.message = Some("quantity must be a finite number".into());
        Err(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SalesBatchResult {
    pub inserted: u64,
}

#[derive(Clone)]
pub struct SalesService {
    db: Arc<DatabaseConnection>,
    max_batch: usize,
}

impl SalesService {
    pub fn new(db: Arc<DatabaseConnection>, max_batch: usize) -> Self {
        Self { db, max_batch }
    }

    /// Records a batch of daily sales atomically.
    ///
    /// Every product and the company, when given, must belong to the batch's
    /// group.
    #[instrument(skip(self, batch), fields(group_id = %batch.group_id, entries = batch.entries.len()))]
    pub async fn record_batch(&self, batch: SalesBatch) -> Result<SalesBatchResult, ServiceError> {
        validate_batch(&batch, self.max_batch)?;

        if let Some(company_id) = batch.company_id {
            let in_group = CompanyEntity::find_by_id(company_id)
                .filter(company::Column::GroupId.eq(batch.group_id))
                .count(&*self.db)
                .await?;
            if in_group == 0 {
                warn!(%company_id, "Sales batch references a company outside the group");
                return Err(ServiceError::NotFound(format!(
                    "company {} in group {}",
                    company_id, batch.group_id
                )));
            }
        }

        let requested: BTreeSet<Uuid> = batch.entries.iter().map(|e| e.product_id).collect();
        let known: BTreeSet<Uuid> = ResaleProductEntity::find()
            .select_only()
            .column(resale_product::Column::Id)
            .filter(resale_product::Column::GroupId.eq(batch.group_id))
            .filter(resale_product::Column::Id.is_in(requested.iter().copied()))
            .into_tuple::<Uuid>()
            .all(&*self.db)
            .await?
            .into_iter()
            .collect();

        let unknown: Vec<String> = requested
            .difference(&known)
            .map(Uuid::to_string)
            .collect();
        if !unknown.is_empty() {
            warn!(unknown = ?unknown, "Sales batch references unknown products");
            return Err(ServiceError::ValidationError(format!(
                "unknown product ids for group: {}",
                unknown.join(", ")
            )));
        }

        let now = Utc::now();
        let rows = batch.entries.iter().map(|entry| daily_sale::ActiveModel {
            id: Set(Uuid::new_v4()),
            group_id: Set(batch.group_id),
            company_id: Set(batch.company_id),
            product_id: Set(entry.product_id),
            sale_date: Set(entry.sale_date),
            quantity: Set(entry.quantity),
            created_at: Set(now),
        });

        let txn = self.db.begin().await?;
        let inserted = DailySaleEntity::insert_many(rows)
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        counter!("opsboard_sales.entries_recorded", inserted);
        info!(inserted, "Recorded sales batch");
        Ok(SalesBatchResult { inserted })
    }
}

/// Field rules come from the derive. The batch ceiling is configured.
fn validate_batch(batch: &SalesBatch, max_batch: usize) -> Result<(), ServiceError> {
    batch.validate()?;
    if batch.entries.len() > max_batch {
        return Err(ServiceError::ValidationError(format!(
            "at most {} entries are accepted per batch, got {}",
            max_batch,
            batch.entries.len()
        )));
    }
    Ok(())
}
