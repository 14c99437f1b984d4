use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw material consumed per unit of a resale product sold.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_raw_materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub raw_material_id: Uuid,
    pub quantity_per_unit: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resale_product::Entity",
        from = "Column::ProductId",
        to = "super::resale_product::Column::Id"
    )]
    ResaleProduct,
    #[sea_orm(
        belongs_to = "super::raw_material::Entity",
        from = "Column::RawMaterialId",
        to = "super::raw_material::Column::Id"
    )]
    RawMaterial,
}

impl Related<super::resale_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResaleProduct.def()
    }
}

impl Related<super::raw_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RawMaterial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
