//! Product domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::{PackagingId, ProductId, RecipeId};

use super::ingredient::default_active;

/// A sellable item assembled from recipe portions and packaging.
///
/// Cost price, suggested price and profit margin are never stored here;
/// they are derived on demand by
/// [`compute_product_pricing`](crate::services::product_pricing::compute_product_pricing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Stock-keeping code, usually built with [`format_sku`].
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Recipe portions that go into one product.
    pub product_recipes: Vec<ProductRecipeItem>,
    /// Packaging consumed by one product.
    #[serde(default)]
    pub product_packages: Vec<ProductPackageItem>,
    /// Selling price.
    pub price: Decimal,
    /// Markup percentage applied to cost to suggest a price.
    #[serde(default)]
    pub markup: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Portions of a recipe used in a product, in the recipe's generated unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecipeItem {
    pub recipe_id: RecipeId,
    pub portions: Decimal,
}

/// Packaging items used in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPackageItem {
    pub packaging_id: PackagingId,
    pub quantity: Decimal,
}

/// Build a product SKU as `{CATEGORY}-{SUBCATEGORY}-{NNN}`.
///
/// Codes are upper-cased and the sequence is zero-padded to three digits;
/// larger sequences keep all their digits. Allocating the sequence number
/// is up to the caller.
#[must_use]
pub fn format_sku(category_code: &str, subcategory_code: &str, sequence: u32) -> String {
    format!(
        "{}-{}-{sequence:03}",
        category_code.trim().to_uppercase(),
        subcategory_code.trim().to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sku_pads_sequence() {
        assert_eq!(format_sku("CAKE", "CHOC", 1), "CAKE-CHOC-001");
        assert_eq!(format_sku("cup", " van ", 42), "CUP-VAN-042");
        assert_eq!(format_sku("CAKE", "CHOC", 1234), "CAKE-CHOC-1234");
    }
}
