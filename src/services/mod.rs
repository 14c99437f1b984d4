//! Business logic behind the HTTP handlers.

pub mod catalog;
pub mod holidays;
pub mod projection;
pub mod raw_materials;
pub mod sales;

use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

/// Items visible to a company: its own plus those shared across the group.
pub(crate) fn company_scope<C: ColumnTrait>(column: C, company_id: Option<Uuid>) -> Condition {
    match company_id {
        Some(id) => Condition::any().add(column.eq(id)).add(column.is_null()),
        None => Condition::all(),
    }
}

/// Case-insensitive search term; blank terms mean no filter.
pub(crate) fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}
