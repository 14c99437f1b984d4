//! SeaORM entities backing the catalog, stock and sales history.

pub mod company;
pub mod daily_sale;
pub mod holiday;
pub mod product_raw_material;
pub mod raw_material;
pub mod resale_product;
