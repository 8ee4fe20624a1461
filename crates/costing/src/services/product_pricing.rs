//! Product cost price, suggested price and profit margin.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use bakehouse_core::{MarginViability, PackagingId, RecipeId, percent_of, round_money};

use crate::error::CostingError;
use crate::models::Product;

/// Derived pricing figures for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// Recipe portions plus packaging.
    pub cost_price: Decimal,
    /// `cost_price` with the product's markup applied.
    pub suggested_price: Decimal,
    /// Realized margin of the selling price, as a percentage.
    pub profit_margin: Decimal,
}

impl ProductPricing {
    /// All three values rounded to cents.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            cost_price: round_money(self.cost_price),
            suggested_price: round_money(self.suggested_price),
            profit_margin: round_money(self.profit_margin),
        }
    }

    /// Whether the realized margin is healthy.
    #[must_use]
    pub fn viability(&self) -> MarginViability {
        MarginViability::from_margin(self.profit_margin)
    }
}

/// Price a product from precomputed recipe and packaging costs.
///
/// `recipe_costs` maps each recipe to its cost per yield unit;
/// `packaging_costs` maps each packaging item to its unit price.
///
/// # Errors
///
/// Returns `MissingRecipeCost` or `MissingPackagingCost` when the product
/// references an entry absent from the corresponding map.
#[instrument(skip_all, fields(product_id = %product.id))]
pub fn compute_product_pricing(
    product: &Product,
    recipe_costs: &HashMap<RecipeId, Decimal>,
    packaging_costs: &HashMap<PackagingId, Decimal>,
) -> Result<ProductPricing, CostingError> {
    let mut cost_price = Decimal::ZERO;

    for item in &product.product_recipes {
        let cost = recipe_costs
            .get(&item.recipe_id)
            .ok_or_else(|| CostingError::MissingRecipeCost(item.recipe_id.clone()))?;
        cost_price += cost * item.portions;
    }

    for item in &product.product_packages {
        let cost = packaging_costs
            .get(&item.packaging_id)
            .ok_or_else(|| CostingError::MissingPackagingCost(item.packaging_id.clone()))?;
        cost_price += cost * item.quantity;
    }

    let suggested_price = cost_price + percent_of(cost_price, product.markup);
    let profit_margin = if product.price.is_zero() {
        Decimal::ZERO
    } else {
        (product.price - cost_price) / product.price * Decimal::ONE_HUNDRED
    };

    debug!(%cost_price, %suggested_price, %profit_margin, "Product priced");

    Ok(ProductPricing {
        cost_price,
        suggested_price,
        profit_margin,
    })
}
