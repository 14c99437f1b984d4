use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use super::history::finite_or_zero;

/// How a purchase need is expressed in the purchasing unit.
///
/// Resale products are bought in whole purchasing units; raw-material
/// quantities are reported unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseRounding {
    Ceil,
    Exact,
}

impl PurchaseRounding {
    fn apply(self, quantity: f64) -> f64 {
        match self {
            PurchaseRounding::Ceil => quantity.ceil(),
            PurchaseRounding::Exact => quantity,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StockStatus {
    Out,
    Low,
    Ok,
}

impl StockStatus {
    pub fn classify(current_stock: f64, min_stock: f64) -> Self {
        if current_stock <= 0.0 {
            StockStatus::Out
        } else if current_stock < min_stock {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }
}

/// Stock snapshot in the stocking unit. Missing or non-finite values are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StockPosition {
    pub current_stock: f64,
    pub min_stock: f64,
    /// Stocking units per purchasing unit.
    pub conversion_factor: f64,
}

impl StockPosition {
    pub fn from_options(
        current_stock: Option<f64>,
        min_stock: Option<f64>,
        conversion_factor: Option<f64>,
    ) -> Self {
        let clean = |value: Option<f64>| finite_or_zero(value.unwrap_or(0.0));
        Self {
            current_stock: clean(current_stock),
            min_stock: clean(min_stock),
            conversion_factor: clean(conversion_factor),
        }
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.min_stock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchasePlan {
    /// Shortfall in the stocking unit, never negative.
    pub purchase_need: f64,
    /// Shortfall in the purchasing unit.
    pub purchase_quantity: f64,
    pub needs_purchase: bool,
    pub stock_status: StockStatus,
}

/// Compares projected consumption with stock and the minimum threshold.
pub fn resolve_purchase(
    projected_consumption: f64,
    position: &StockPosition,
    rounding: PurchaseRounding,
) -> PurchasePlan {
    let required = position.min_stock + finite_or_zero(projected_consumption);
    let purchase_need = (required - position.current_stock).max(0.0);

    let purchase_quantity = if position.conversion_factor > 0.0 {
        rounding.apply(purchase_need / position.conversion_factor)
    } else {
        purchase_need
    };

    PurchasePlan {
        purchase_need,
        purchase_quantity,
        needs_purchase: purchase_need > 0.0,
        stock_status: position.status(),
    }
}
