//! Catalog check command.
//!
//! Runs save-time validation on every record, looks for recipe cycles,
//! costs every recipe and prices every product, and lists items that need
//! restocking. Exits with an error if any record is invalid or cannot be
//! costed.
//!
//! # Usage
//!
//! ```bash
//! bh-cli --catalog bakery.yaml check
//! ```

use bakehouse_core::StockStatus;
use bakehouse_costing::models::InventoryItem;
use bakehouse_costing::services::dependency::find_cycles;
use bakehouse_costing::validation::{
    ValidationError, validate_ingredient, validate_packaging, validate_product, validate_recipe,
};
use bakehouse_costing::Catalog;

use super::CommandError;

/// Check every record in `catalog`.
pub fn check(catalog: &Catalog) -> Result<(), CommandError> {
    let mut problems = 0;

    if let Err(errors) = catalog.settings().validate() {
        problems += report("settings", &errors);
    }
    for ingredient in catalog.ingredients() {
        if let Err(errors) = validate_ingredient(ingredient) {
            problems += report(ingredient.id.as_str(), &errors);
        }
    }
    for packaging in catalog.packaging_items() {
        if let Err(errors) = validate_packaging(packaging) {
            problems += report(packaging.id.as_str(), &errors);
        }
    }
    for recipe in catalog.recipes() {
        if let Err(errors) = validate_recipe(recipe) {
            problems += report(recipe.id.as_str(), &errors);
        }
    }
    for product in catalog.products() {
        if let Err(errors) = validate_product(product) {
            problems += report(product.id.as_str(), &errors);
        }
    }

    let cycles = find_cycles(catalog.recipes(), catalog);
    for cycle in &cycles {
        let path: Vec<_> = cycle.cycle.iter().map(|id| id.as_str()).collect();
        tracing::error!("{}: cyclic recipe reference {}", cycle.recipe_id, path.join(" -> "));
    }
    problems += cycles.len();

    // Cycles are already reported; cost only what can terminate
    for recipe in catalog.recipes() {
        if cycles.iter().any(|c| c.recipe_id == recipe.id) {
            continue;
        }
        if let Err(e) = catalog.recipe_cost(&recipe.id) {
            tracing::error!("{}: {e}", recipe.id);
            problems += 1;
        }
    }
    for product in catalog.products() {
        if let Err(e) = catalog.price_product(product) {
            tracing::error!("{}: {e}", product.id);
            problems += 1;
        }
    }

    let restock = low_stock(catalog.ingredients()).chain(low_stock(catalog.packaging_items()));
    for (id, status) in restock {
        tracing::warn!("{id}: stock {status:?}");
    }

    if problems > 0 {
        return Err(CommandError::CheckFailed(problems));
    }
    tracing::info!("Catalog OK");
    Ok(())
}

fn report(record: &str, errors: &[ValidationError]) -> usize {
    for error in errors {
        tracing::error!("{record}: {error}");
    }
    errors.len()
}

fn low_stock<'a, T>(items: impl Iterator<Item = &'a T> + 'a) -> impl Iterator<Item = (&'a str, StockStatus)> + 'a
where
    T: InventoryItem + 'a,
{
    items
        .map(|item| (item.item_id(), item.status()))
        .filter(|(_, status)| *status != StockStatus::Good)
}
