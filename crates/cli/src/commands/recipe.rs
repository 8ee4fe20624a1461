//! Recipe commands.
//!
//! # Usage
//!
//! ```bash
//! bh-cli recipe cost rec_chocolate_cake --breakdown
//! bh-cli recipe scale rec_chocolate_cake 24
//! bh-cli recipe can-use rec_ganache rec_chocolate_cake
//! ```

use bakehouse_core::RecipeId;
use bakehouse_costing::services::breakdown::{CostBreakdown, ItemKind, compute_cost_breakdown};
use bakehouse_costing::services::dependency::check_circular_dependency;
use bakehouse_costing::services::scaling::scale_recipe;
use bakehouse_costing::{Catalog, RecipeCost, RecipeResolver, compute_recipe_cost};

use super::{CommandError, money};

/// Cost one batch of a recipe, optionally with a full breakdown.
pub fn cost(catalog: &Catalog, id: &str, breakdown: bool) -> Result<RecipeCost, CommandError> {
    let id = RecipeId::new(id);
    let recipe = catalog
        .recipe(&id)
        .ok_or_else(|| CommandError::UnknownRecipe(id.clone()))?;

    let cost = compute_recipe_cost(recipe, catalog, catalog)?;
    let rounded = cost.rounded();

    tracing::info!("{} ({})", recipe.name, recipe.id);
    tracing::info!(
        "  Yield: {} {} / {} servings",
        recipe.generated_amount.normalize(),
        recipe.generated_unit,
        recipe.servings
    );
    tracing::info!("  Total cost: {}", money(rounded.total_cost));
    tracing::info!(
        "  Cost per {}: {}",
        recipe.generated_unit,
        money(rounded.cost_per_yield_unit)
    );

    if breakdown {
        let report = compute_cost_breakdown(recipe, catalog, catalog, catalog.settings())?;
        log_breakdown(&report.rounded());
    }

    Ok(cost)
}

fn log_breakdown(report: &CostBreakdown) {
    tracing::info!("");
    for line in &report.lines {
        let kind = match line.kind {
            ItemKind::Ingredient => "ingredient",
            ItemKind::SubRecipe => "recipe",
        };
        tracing::info!(
            "  [{kind}] {} {} {}: {}",
            line.quantity.normalize(),
            line.unit,
            line.name,
            money(line.total_cost)
        );
    }
    tracing::info!("");
    tracing::info!("  Ingredients: {}", money(report.ingredient_cost));
    tracing::info!("  Sub-recipes: {}", money(report.sub_recipe_cost));
    tracing::info!(
        "  Labor ({} min): {}",
        report.preparation_minutes,
        money(report.labor_cost)
    );
    tracing::info!("  Total with labor: {}", money(report.total_cost));
    if let Some(portion) = report.portion_size {
        tracing::info!(
            "  Serving: {} {} ({} servings)",
            portion.round_dp(3).normalize(),
            report.generated_unit,
            report.servings
        );
    }
    tracing::info!("  Cost per serving: {}", money(report.cost_per_serving));
    tracing::info!(
        "  Suggested price per serving ({}% margin): {}",
        report.margin.normalize(),
        money(report.suggested_price)
    );
    tracing::info!(
        "  Profit per serving: {} ({}%)",
        money(report.profit_amount),
        report.profit_percentage
    );
}

/// Scale a recipe to a new serving count and list the adjusted quantities.
pub fn scale(catalog: &Catalog, id: &str, servings: u32) -> Result<(), CommandError> {
    let id = RecipeId::new(id);
    let recipe = catalog
        .recipe(&id)
        .ok_or_else(|| CommandError::UnknownRecipe(id.clone()))?;

    let scaled = scale_recipe(recipe, servings)?;

    tracing::info!(
        "{}: {} -> {} servings (x{})",
        recipe.name,
        recipe.servings,
        scaled.recipe.servings,
        scaled.factor.round_dp(4).normalize()
    );
    for adjustment in &scaled.adjustments {
        tracing::info!(
            "  line {}: {} -> {} {}",
            adjustment.item_index + 1,
            adjustment.original_quantity.normalize(),
            adjustment.scaled_quantity.round_dp(3).normalize(),
            adjustment.unit
        );
    }
    tracing::info!(
        "  Yield: {} {}",
        scaled.recipe.generated_amount.round_dp(3).normalize(),
        scaled.recipe.generated_unit
    );
    Ok(())
}

/// Report whether `sub_recipe` can be added to recipe `id` without a cycle.
pub fn can_use(catalog: &Catalog, id: &str, sub_recipe: &str) -> Result<bool, CommandError> {
    let id = RecipeId::new(id);
    let sub_recipe = RecipeId::new(sub_recipe);
    for recipe_id in [&id, &sub_recipe] {
        if catalog.recipe(recipe_id).is_none() {
            return Err(CommandError::UnknownRecipe(recipe_id.clone()));
        }
    }

    match check_circular_dependency(&id, &sub_recipe, catalog) {
        Some(path) => {
            let path: Vec<_> = path.iter().map(RecipeId::as_str).collect();
            tracing::warn!(
                "{} cannot use {}: it would create the cycle {}",
                id,
                sub_recipe,
                path.join(" -> ")
            );
            Ok(false)
        }
        None => {
            tracing::info!("{id} can use {sub_recipe}");
            Ok(true)
        }
    }
}
