//! Packaging domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::{PackagingCategory, PackagingId, SupplierId, Unit};

use super::ingredient::default_active;
use crate::error::CostingError;

/// Boxes, bases, toppers and other consumables a product ships in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packaging {
    pub id: PackagingId,
    pub name: String,
    pub unit: Unit,
    /// Items per purchased pack (e.g. `500` sheets per ream).
    pub measurement_value: Decimal,
    /// Price paid per pack.
    pub current_price: Decimal,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(default)]
    pub current_stock: Decimal,
    #[serde(default)]
    pub min_stock: Decimal,
    #[serde(default)]
    pub category: PackagingCategory,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Packaging {
    /// Flat cost of one packaging item.
    ///
    /// # Errors
    ///
    /// Returns `CostingError::InvalidQuantity` if `measurement_value` is not
    /// positive.
    pub fn unit_price(&self) -> Result<Decimal, CostingError> {
        if self.measurement_value <= Decimal::ZERO {
            return Err(CostingError::invalid_quantity(
                format_args!("measurement value of packaging {}", self.id),
                self.measurement_value,
            ));
        }
        Ok(self.current_price / self.measurement_value)
    }
}
