use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quantity of a resale product sold on one day at one company.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_id: Uuid,
    pub company_id: Option<Uuid>,
    pub product_id: Uuid,
    pub sale_date: Date,
    pub quantity: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resale_product::Entity",
        from = "Column::ProductId",
        to = "super::resale_product::Column::Id"
    )]
    ResaleProduct,
}

impl Related<super::resale_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResaleProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
