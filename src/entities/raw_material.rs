use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item consumed through the resale products linked to it.
///
/// Materials form a two-level hierarchy through `parent_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_id: Uuid,
    pub company_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub stock_unit: Option<String>,
    pub current_stock: f64,
    pub min_stock: f64,
    pub conversion_factor: f64,
    pub purchase_unit: Option<String>,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_raw_material::Entity")]
    ProductRawMaterials,
}

impl Related<super::product_raw_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductRawMaterials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
