use crate::{
    entities::holiday::{self, Entity as HolidayEntity},
    errors::ServiceError,
    projection::HolidayCalendar,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Holiday as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Holiday {
    pub id: Uuid,
    pub group_id: Uuid,
    pub holiday_date: NaiveDate,
    pub name: String,
    pub recurring: bool,
}

impl From<holiday::Model> for Holiday {
    fn from(model: holiday::Model) -> Self {
        Self {
            id: model.id,
            group_id: model.group_id,
            holiday_date: model.holiday_date,
            name: model.name,
            recurring: model.recurring,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHolidayInput {
    pub group_id: Uuid,
    pub holiday_date: NaiveDate,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub recurring: bool,
}

/// Per-tenant holiday calendar
#[derive(Clone)]
pub struct HolidayService {
    db: Arc<DatabaseConnection>,
}

impl HolidayService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, group_id: Uuid) -> Result<Vec<Holiday>, ServiceError> {
        let rows = HolidayEntity::find()
            .filter(holiday::Column::GroupId.eq(group_id))
            .order_by_asc(holiday::Column::HolidayDate)
            .order_by_asc(holiday::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Holiday::from).collect())
    }

    #[instrument(skip(self, input), fields(group_id = %input.group_id))]
    pub async fn create(&self, input: CreateHolidayInput) -> Result<Holiday, ServiceError> {
        let model = holiday::ActiveModel {
            id: Set(Uuid::new_v4()),
            group_id: Set(input.group_id),
            holiday_date: Set(input.holiday_date),
            name: Set(input.name.trim().to_string()),
            recurring: Set(input.recurring),
        }
        .insert(&*self.db)
        .await?;

        info!(holiday_id = %model.id, date = %model.holiday_date, "Created holiday");
        Ok(model.into())
    }

    /// Loads the calendar the projector consults for `group_id`.
    #[instrument(skip(self))]
    pub async fn calendar(&self, group_id: Uuid) -> Result<HolidayCalendar, ServiceError> {
        let rows: Vec<(NaiveDate, bool)> = HolidayEntity::find()
            .select_only()
            .column(holiday::Column::HolidayDate)
            .column(holiday::Column::Recurring)
            .filter(holiday::Column::GroupId.eq(group_id))
            .into_tuple()
            .all(&*self.db)
            .await?;

        let calendar: HolidayCalendar = rows.into_iter().collect();
        debug!(entries = calendar.len(), "Loaded holiday calendar");
        Ok(calendar)
    }
}
