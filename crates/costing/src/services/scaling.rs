//! Scale a recipe to a different number of servings.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use bakehouse_core::Unit;

use crate::error::CostingError;
use crate::models::Recipe;

const MAX_TARGET_SERVINGS: u32 = 999;

/// A recipe rewritten for a new serving count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaledRecipe {
    /// Copy of the original with every quantity multiplied by `factor`.
    pub recipe: Recipe,
    /// `target_servings / original servings`.
    pub factor: Decimal,
    /// One entry per recipe line, in order.
    pub adjustments: Vec<ScaleAdjustment>,
}

/// How one recipe line changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleAdjustment {
    pub item_index: usize,
    pub unit: Unit,
    pub original_quantity: Decimal,
    pub scaled_quantity: Decimal,
}

/// Scale `recipe` so that it yields `target_servings`.
///
/// The generated amount and every line quantity are multiplied by the same
/// factor. Instructions are left untouched.
///
/// # Errors
///
/// Returns `InvalidQuantity` if `target_servings` is outside `1..=999` or the
/// recipe declares zero servings.
#[instrument(skip(recipe), fields(recipe_id = %recipe.id))]
pub fn scale_recipe(recipe: &Recipe, target_servings: u32) -> Result<ScaledRecipe, CostingError> {
    if !(1..=MAX_TARGET_SERVINGS).contains(&target_servings) {
        return Err(CostingError::InvalidQuantity(format!(
            "target servings must be between 1 and {MAX_TARGET_SERVINGS} (got {target_servings})"
        )));
    }
    if recipe.servings == 0 {
        return Err(CostingError::invalid_quantity(
            format_args!("servings of recipe {}", recipe.id),
            Decimal::ZERO,
        ));
    }

    let factor = Decimal::from(target_servings) / Decimal::from(recipe.servings);

    let mut scaled = recipe.clone();
    let mut adjustments = Vec::with_capacity(recipe.recipe_items.len());
    scaled.recipe_items = recipe
        .recipe_items
        .iter()
        .enumerate()
        .map(|(item_index, item)| {
            let scaled_quantity = item.quantity() * factor;
            adjustments.push(ScaleAdjustment {
                item_index,
                unit: item.unit(),
                original_quantity: item.quantity(),
                scaled_quantity,
            });
            item.with_quantity(scaled_quantity)
        })
        .collect();
    scaled.generated_amount = recipe.generated_amount * factor;
    scaled.servings = target_servings;

    Ok(ScaledRecipe {
        recipe: scaled,
        factor,
        adjustments,
    })
}
