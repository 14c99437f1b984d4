use crate::{
    entities::raw_material::{self, Entity as RawMaterialEntity},
    errors::ServiceError,
    projection::StockStatus,
    services::{company_scope, normalize_search},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawMaterialSummary {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub stock_unit: Option<String>,
    pub current_stock: f64,
    pub min_stock: f64,
    pub stock_status: StockStatus,
}

impl From<raw_material::Model> for RawMaterialSummary {
    fn from(model: raw_material::Model) -> Self {
        Self {
            stock_status: StockStatus::classify(model.current_stock, model.min_stock),
            id: model.id,
            parent_id: model.parent_id,
            name: model.name,
            stock_unit: model.stock_unit,
            current_stock: model.current_stock,
            min_stock: model.min_stock,
        }
    }
}

/// A root material with all of its descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawMaterialNode {
    #[serde(flatten)]
    pub material: RawMaterialSummary,
    pub children: Vec<RawMaterialSummary>,
}

#[derive(Clone)]
pub struct RawMaterialService {
    db: Arc<DatabaseConnection>,
}

impl RawMaterialService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn tree(
        &self,
        group_id: Uuid,
        company_id: Option<Uuid>,
        search: Option<String>,
    ) -> Result<Vec<RawMaterialNode>, ServiceError> {
        let rows = RawMaterialEntity::find()
            .filter(raw_material::Column::GroupId.eq(group_id))
            .filter(raw_material::Column::Active.eq(true))
            .filter(company_scope(raw_material::Column::CompanyId, company_id))
            .all(&*self.db)
            .await?;

        debug!(materials = rows.len(), "Building raw material tree");
        let materials = rows.into_iter().map(RawMaterialSummary::from).collect();
        Ok(build_tree(materials, search.as_deref()))
    }
}

/// Arranges materials into roots and their descendants, sorted by name.
///
/// A material whose parent is not in `materials` is treated as a root.
/// Grandchildren and deeper descendants are listed under their top-level
/// root, and `parent_id` still names their direct parent. A material whose
/// ancestry loops back on itself is listed as a root.
/// With a search term a root survives when it or one of its descendants
/// matches; a matching root keeps all of them, otherwise only matching
/// descendants are kept.
pub fn build_tree(materials: Vec<RawMaterialSummary>, search: Option<&str>) -> Vec<RawMaterialNode> {
    let ids: HashSet<Uuid> = materials.iter().map(|m| m.id).collect();
    let parents: HashMap<Uuid, Uuid> = materials
        .iter()
        .filter_map(|m| {
            m.parent_id
                .filter(|parent| *parent != m.id && ids.contains(parent))
                .map(|parent| (m.id, parent))
        })
        .collect();

    let term = normalize_search(search);
    let matches = |m: &RawMaterialSummary| {
        term.as_deref()
            .map_or(true, |t| m.name.to_lowercase().contains(t))
    };

    let mut roots = Vec::new();
    let mut descendants: HashMap<Uuid, Vec<RawMaterialSummary>> = HashMap::new();
    for material in materials {
        let root = root_of(material.id, &parents);
        if root == material.id {
            roots.push(material);
        } else {
            descendants.entry(root).or_default().push(material);
        }
    }

    let mut tree: Vec<RawMaterialNode> = roots
        .into_iter()
        .filter_map(|root| {
            let mut kids = descendants.remove(&root.id).unwrap_or_default();
            if !matches(&root) {
                kids.retain(|child| matches(child));
                if kids.is_empty() {
                    return None;
                }
            }
            kids.sort_by(by_name);
            Some(RawMaterialNode {
                material: root,
                children: kids,
            })
        })
        .collect();

    tree.sort_by(|a, b| by_name(&a.material, &b.material));
    tree
}

/// Top-level ancestor of `id`, or `id` itself when its ancestry has a cycle.
fn root_of(id: Uuid, parents: &HashMap<Uuid, Uuid>) -> Uuid {
    let mut seen = HashSet::new();
    let mut current = id;
    while let Some(&parent) = parents.get(&current) {
        if !seen.insert(current) {
            return id;
        }
        current = parent;
    }
    current
}

fn by_name(a: &RawMaterialSummary, b: &RawMaterialSummary) -> std::cmp::Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}
