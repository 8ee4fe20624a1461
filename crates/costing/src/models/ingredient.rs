//! Ingredient domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::{IngredientCategory, IngredientId, SupplierId, Unit};

use crate::error::CostingError;

/// A purchasable raw material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Document ID.
    pub id: IngredientId,
    /// Ingredient name.
    pub name: String,
    /// Unit the ingredient is purchased and priced in.
    pub unit: Unit,
    /// Size of one purchased unit (e.g. `1` for "1 kg of sugar").
    pub measurement_value: Decimal,
    /// Price paid for `measurement_value` of `unit`.
    pub current_price: Decimal,
    /// Brand name, if tracked.
    #[serde(default)]
    pub brand: Option<String>,
    /// Preferred supplier.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    /// Stock on hand, in `unit`.
    #[serde(default)]
    pub current_stock: Decimal,
    /// Reorder threshold, in `unit`.
    #[serde(default)]
    pub min_stock: Decimal,
    /// Category for organization.
    #[serde(default)]
    pub category: IngredientCategory,
    /// Allergens present in the ingredient.
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Soft-delete flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Ingredient {
    /// Price of a single `unit` of this ingredient.
    ///
    /// # Errors
    ///
    /// Returns `CostingError::InvalidQuantity` if `measurement_value` is not
    /// positive.
    pub fn price_per_unit(&self) -> Result<Decimal, CostingError> {
        if self.measurement_value <= Decimal::ZERO {
            return Err(CostingError::invalid_quantity(
                format_args!("measurement value of ingredient {}", self.id),
                self.measurement_value,
            ));
        }
        Ok(self.current_price / self.measurement_value)
    }
}

pub(crate) const fn default_active() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::InventoryItem;
    use bakehouse_core::StockStatus;

    fn flour() -> Ingredient {
        Ingredient {
            id: IngredientId::new("ing_flour"),
            name: "Farinha de Trigo".to_string(),
            unit: Unit::Kilogram,
            measurement_value: Decimal::from(5),
            current_price: Decimal::new(2750, 2),
            brand: None,
            supplier_id: None,
            current_stock: Decimal::from(3),
            min_stock: Decimal::from(10),
            category: IngredientCategory::Flour,
            allergens: vec!["gluten".to_string()],
            is_active: true,
        }
    }

    #[test]
    fn test_price_per_unit() {
        assert_eq!(flour().price_per_unit().unwrap(), Decimal::new(550, 2));
    }

    #[test]
    fn test_price_per_unit_rejects_zero_measurement() {
        let mut ingredient = flour();
        ingredient.measurement_value = Decimal::ZERO;
        assert!(matches!(
            ingredient.price_per_unit(),
            Err(CostingError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(flour().status(), StockStatus::Critical);

        let mut at_minimum = flour();
        at_minimum.current_stock = Decimal::from(10);
        assert_eq!(at_minimum.status(), StockStatus::Low);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": "ing_sugar",
            "name": "Açúcar",
            "unit": "kg",
            "measurement_value": "1",
            "current_price": "4.00"
        }"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.unit, Unit::Kilogram);
        assert_eq!(ingredient.current_price, Decimal::new(400, 2));
        assert!(ingredient.is_active);
        assert_eq!(ingredient.category, IngredientCategory::Other);
    }
}
