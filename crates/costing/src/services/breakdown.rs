//! Per-line recipe cost breakdown with labor and suggested selling price.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use bakehouse_core::{RecipeCategory, RecipeId, Unit, percent_of, round_money};

use super::recipe_cost::compute_item_costs;
use crate::error::CostingError;
use crate::models::{Recipe, RecipeItem, RecipeSettings};
use crate::resolver::{IngredientResolver, RecipeResolver};

/// What a breakdown line references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Ingredient,
    SubRecipe,
}

/// One priced line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    pub kind: ItemKind,
    /// ID of the referenced ingredient or recipe.
    pub reference_id: String,
    pub name: String,
    /// Quantity as written in the recipe.
    pub quantity: Decimal,
    pub unit: Unit,
    /// Price of one unit of the referenced record's own unit.
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
}

/// Full cost report for one batch of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub recipe_id: RecipeId,
    pub category: RecipeCategory,
    pub lines: Vec<BreakdownLine>,
    pub ingredient_cost: Decimal,
    pub sub_recipe_cost: Decimal,
    /// Same value as `RecipeCost::total_cost`.
    pub total_item_cost: Decimal,
    pub preparation_minutes: u32,
    pub labor_cost: Decimal,
    /// Items plus labor.
    pub total_cost: Decimal,
    pub servings: u32,
    /// Amount of `generated_unit` in one serving, if the recipe has servings.
    pub portion_size: Option<Decimal>,
    pub generated_unit: Unit,
    pub cost_per_serving: Decimal,
    /// Category margin percentage applied to the cost per serving.
    pub margin: Decimal,
    pub suggested_price: Decimal,
    pub profit_amount: Decimal,
    pub profit_percentage: Decimal,
}

impl CostBreakdown {
    /// Every money value rounded to cents.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .map(|line| BreakdownLine {
                    total_cost: round_money(line.total_cost),
                    ..line.clone()
                })
                .collect(),
            ingredient_cost: round_money(self.ingredient_cost),
            sub_recipe_cost: round_money(self.sub_recipe_cost),
            total_item_cost: round_money(self.total_item_cost),
            labor_cost: round_money(self.labor_cost),
            total_cost: round_money(self.total_cost),
            cost_per_serving: round_money(self.cost_per_serving),
            suggested_price: round_money(self.suggested_price),
            profit_amount: round_money(self.profit_amount),
            profit_percentage: round_money(self.profit_percentage),
            ..self.clone()
        }
    }
}

/// Break down the cost of one batch of `recipe`.
///
/// Labor is charged for the recipe's own preparation time only. Sub-recipes
/// contribute their item cost, exactly as in
/// [`compute_recipe_cost`](super::recipe_cost::compute_recipe_cost).
///
/// # Errors
///
/// Same as [`compute_recipe_cost`](super::recipe_cost::compute_recipe_cost).
#[instrument(skip_all, fields(recipe_id = %recipe.id))]
pub fn compute_cost_breakdown<I, R>(
    recipe: &Recipe,
    ingredients: &I,
    recipes: &R,
    settings: &RecipeSettings,
) -> Result<CostBreakdown, CostingError>
where
    I: IngredientResolver + ?Sized,
    R: RecipeResolver + ?Sized,
{
    let costs = compute_item_costs(recipe, ingredients, recipes)?;

    let mut ingredient_cost = Decimal::ZERO;
    let mut sub_recipe_cost = Decimal::ZERO;
    let lines: Vec<BreakdownLine> = recipe
        .recipe_items
        .iter()
        .zip(costs)
        .map(|(item, cost)| {
            let (kind, reference_id) = match item {
                RecipeItem::Ingredient { ingredient_id, .. } => {
                    ingredient_cost += cost.cost;
                    (ItemKind::Ingredient, ingredient_id.to_string())
                }
                RecipeItem::SubRecipe { sub_recipe_id, .. } => {
                    sub_recipe_cost += cost.cost;
                    (ItemKind::SubRecipe, sub_recipe_id.to_string())
                }
            };
            BreakdownLine {
                kind,
                reference_id,
                name: cost.name,
                quantity: item.quantity(),
                unit: item.unit(),
                unit_cost: cost.unit_cost,
                total_cost: cost.cost,
            }
        })
        .collect();

    let total_item_cost = ingredient_cost + sub_recipe_cost;
    let preparation_minutes = recipe.preparation_time();
    let labor_cost =
        Decimal::from(preparation_minutes) / Decimal::from(60) * settings.labor_hour_rate;
    let total_cost = total_item_cost + labor_cost;

    let cost_per_serving = if recipe.servings == 0 {
        Decimal::ZERO
    } else {
        total_cost / Decimal::from(recipe.servings)
    };
    let margin = settings.margin_for(recipe.category);
    let suggested_price = percent_of(cost_per_serving, margin);
    let profit_amount = suggested_price - cost_per_serving;
    let profit_percentage = if cost_per_serving.is_zero() {
        Decimal::ZERO
    } else {
        profit_amount / cost_per_serving * Decimal::ONE_HUNDRED
    };

    Ok(CostBreakdown {
        recipe_id: recipe.id.clone(),
        category: recipe.category,
        lines,
        ingredient_cost,
        sub_recipe_cost,
        total_item_cost,
        preparation_minutes,
        labor_cost,
        total_cost,
        servings: recipe.servings,
        portion_size: recipe.portion_size(),
        generated_unit: recipe.generated_unit,
        cost_per_serving,
        margin,
        suggested_price,
        profit_amount,
        profit_percentage,
    })
}
