//! Recursive recipe cost aggregation.
//!
//! A recipe's cost is the sum of its lines. Ingredient lines are priced
//! from the ingredient's current price; sub-recipe lines are priced from the
//! sub-recipe's own cost per yield unit, computed recursively. The walk keeps
//! the chain of recipes currently being costed so that a recipe which
//! (directly or transitively) uses itself is reported instead of recursing
//! forever.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use bakehouse_core::{RecipeId, Unit, convert, round_money};

use crate::error::CostingError;
use crate::models::{Ingredient, Recipe, RecipeItem};
use crate::resolver::{IngredientResolver, RecipeResolver};

/// Cost of one batch of a recipe.
///
/// Values carry full decimal precision. Call [`RecipeCost::rounded`] before
/// displaying or persisting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCost {
    /// Sum of every line's cost.
    pub total_cost: Decimal,
    /// `total_cost / generated_amount`.
    pub cost_per_yield_unit: Decimal,
}

impl RecipeCost {
    /// Both values rounded to cents.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            total_cost: round_money(self.total_cost),
            cost_per_yield_unit: round_money(self.cost_per_yield_unit),
        }
    }
}

/// Cost of a single recipe line, priced from the record it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCost {
    /// Name of the referenced ingredient or recipe.
    pub name: String,
    /// Line quantity expressed in `priced_unit`.
    pub priced_quantity: Decimal,
    /// Unit the referenced record is priced in.
    pub priced_unit: Unit,
    /// Price of one `priced_unit`.
    pub unit_cost: Decimal,
    /// `priced_quantity * unit_cost`.
    pub cost: Decimal,
}

/// Compute the cost of one batch of `recipe`.
///
/// # Errors
///
/// - `UnknownIngredient` / `UnknownRecipe` if a line references a missing record
/// - `CyclicRecipeReference` if the recipe graph reachable from `recipe` has a cycle
/// - `IncompatibleUnits` if a line's unit cannot convert to the referenced record's unit
/// - `InvalidQuantity` for non-positive quantities, yields or measurement values
#[instrument(skip_all, fields(recipe_id = %recipe.id))]
pub fn compute_recipe_cost<I, R>(
    recipe: &Recipe,
    ingredients: &I,
    recipes: &R,
) -> Result<RecipeCost, CostingError>
where
    I: IngredientResolver + ?Sized,
    R: RecipeResolver + ?Sized,
{
    let cost = CostWalk::new(recipe, ingredients, recipes).recipe_cost(recipe)?;
    debug!(
        total_cost = %cost.total_cost,
        cost_per_yield_unit = %cost.cost_per_yield_unit,
        "Recipe costed"
    );
    Ok(cost)
}

/// Price every line of `recipe`, in declaration order.
///
/// Sub-recipe lines are costed recursively with the same cycle detection as
/// [`compute_recipe_cost`]; the sum of the returned costs equals its
/// `total_cost`.
///
/// # Errors
///
/// Same as [`compute_recipe_cost`].
#[instrument(skip_all, fields(recipe_id = %recipe.id))]
pub fn compute_item_costs<I, R>(
    recipe: &Recipe,
    ingredients: &I,
    recipes: &R,
) -> Result<Vec<ItemCost>, CostingError>
where
    I: IngredientResolver + ?Sized,
    R: RecipeResolver + ?Sized,
{
    let mut walk = CostWalk::new(recipe, ingredients, recipes);
    recipe
        .recipe_items
        .iter()
        .map(|item| walk.item_cost(item))
        .collect()
}

/// Price of `quantity` `unit` of an ingredient.
///
/// # Errors
///
/// Returns `IncompatibleUnits` or `InvalidQuantity` from conversion, or
/// `InvalidQuantity` if the ingredient's measurement value is not positive.
pub fn ingredient_line_cost(
    ingredient: &Ingredient,
    quantity: Decimal,
    unit: Unit,
) -> Result<ItemCost, CostingError> {
    let priced_quantity = convert(quantity, unit, ingredient.unit)?;
    let unit_cost = ingredient.price_per_unit()?;
    Ok(ItemCost {
        name: ingredient.name.clone(),
        priced_quantity,
        priced_unit: ingredient.unit,
        unit_cost,
        cost: priced_quantity * unit_cost,
    })
}

/// State for one top-level cost computation.
///
/// `visiting` holds the recipes on the current path, starting with the
/// top-level recipe. `memo` caches finished sub-recipes and is dropped with
/// the walk.
struct CostWalk<'a, I: ?Sized, R: ?Sized> {
    ingredients: &'a I,
    recipes: &'a R,
    visiting: Vec<RecipeId>,
    memo: HashMap<RecipeId, RecipeCost>,
}

impl<'a, I, R> CostWalk<'a, I, R>
where
    I: IngredientResolver + ?Sized,
    R: RecipeResolver + ?Sized,
{
    fn new(root: &Recipe, ingredients: &'a I, recipes: &'a R) -> Self {
        Self {
            ingredients,
            recipes,
            visiting: vec![root.id.clone()],
            memo: HashMap::new(),
        }
    }

    fn recipe_cost(&mut self, recipe: &Recipe) -> Result<RecipeCost, CostingError> {
        if recipe.generated_amount <= Decimal::ZERO {
            return Err(CostingError::invalid_quantity(
                format_args!("generated amount of recipe {}", recipe.id),
                recipe.generated_amount,
            ));
        }

        let mut total_cost = Decimal::ZERO;
        for item in &recipe.recipe_items {
            total_cost += self.item_cost(item)?.cost;
        }

        Ok(RecipeCost {
            total_cost,
            cost_per_yield_unit: total_cost / recipe.generated_amount,
        })
    }

    fn item_cost(&mut self, item: &RecipeItem) -> Result<ItemCost, CostingError> {
        let line = match item {
            RecipeItem::Ingredient {
                ingredient_id,
                quantity,
                unit,
                ..
            } => {
                let ingredient = self
                    .ingredients
                    .ingredient(ingredient_id)
                    .ok_or_else(|| CostingError::UnknownIngredient(ingredient_id.clone()))?;
                ingredient_line_cost(ingredient, *quantity, *unit)?
            }
            RecipeItem::SubRecipe {
                sub_recipe_id,
                quantity,
                unit,
                ..
            } => {
                let recipes = self.recipes;
                let sub_recipe = recipes
                    .recipe(sub_recipe_id)
                    .ok_or_else(|| CostingError::UnknownRecipe(sub_recipe_id.clone()))?;
                let sub_cost = self.sub_recipe_cost(sub_recipe)?;
                let priced_quantity = convert(*quantity, *unit, sub_recipe.generated_unit)?;
                ItemCost {
                    name: sub_recipe.name.clone(),
                    priced_quantity,
                    priced_unit: sub_recipe.generated_unit,
                    unit_cost: sub_cost.cost_per_yield_unit,
                    cost: priced_quantity * sub_cost.cost_per_yield_unit,
                }
            }
        };

        debug!(
            item = %line.name,
            quantity = %line.priced_quantity,
            unit = %line.priced_unit,
            cost = %line.cost,
            "Line costed"
        );
        Ok(line)
    }

    fn sub_recipe_cost(&mut self, sub_recipe: &Recipe) -> Result<RecipeCost, CostingError> {
        if let Some(start) = self.visiting.iter().position(|id| id == &sub_recipe.id) {
            let mut cycle = self.visiting.get(start..).unwrap_or_default().to_vec();
            cycle.push(sub_recipe.id.clone());
            return Err(CostingError::CyclicRecipeReference { cycle });
        }
        if let Some(cost) = self.memo.get(&sub_recipe.id) {
            return Ok(*cost);
        }

        self.visiting.push(sub_recipe.id.clone());
        let result = self.recipe_cost(sub_recipe);
        self.visiting.pop();

        let cost = result?;
        self.memo.insert(sub_recipe.id.clone(), cost);
        Ok(cost)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use bakehouse_core::{IngredientCategory, IngredientId, RecipeCategory, RecipeDifficulty};

    use crate::models::RecipeStep;

    pub(crate) fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    pub(crate) fn ingredient(id: &str, unit: Unit, price: &str) -> Ingredient {
        Ingredient {
            id: IngredientId::new(id),
            name: id.to_string(),
            unit,
            measurement_value: Decimal::ONE,
            current_price: dec(price),
            brand: None,
            supplier_id: None,
            current_stock: Decimal::ZERO,
            min_stock: Decimal::ZERO,
            category: IngredientCategory::Other,
            allergens: Vec::new(),
            is_active: true,
        }
    }

    pub(crate) fn recipe(
        id: &str,
        items: Vec<RecipeItem>,
        generated_amount: &str,
        generated_unit: Unit,
    ) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            name: id.to_string(),
            description: None,
            category: RecipeCategory::Cakes,
            difficulty: RecipeDifficulty::Medium,
            recipe_items: items,
            instructions: vec![RecipeStep {
                step_number: 1,
                instruction: "Bake until golden".to_string(),
                time_minutes: 30,
            }],
            generated_amount: dec(generated_amount),
            generated_unit,
            servings: 10,
            notes: None,
            is_active: true,
        }
    }

    pub(crate) fn ingredient_map(list: Vec<Ingredient>) -> HashMap<IngredientId, Ingredient> {
        list.into_iter().map(|i| (i.id.clone(), i)).collect()
    }

    pub(crate) fn recipe_map(list: Vec<Recipe>) -> HashMap<RecipeId, Recipe> {
        list.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    fn flour_line(quantity: &str, unit: Unit) -> RecipeItem {
        RecipeItem::ingredient(IngredientId::new("flour"), dec(quantity), unit)
    }

    fn sub_line(id: &str, quantity: &str, unit: Unit) -> RecipeItem {
        RecipeItem::sub_recipe(RecipeId::new(id), dec(quantity), unit)
    }

    #[test]
    fn test_ingredient_costs_add_up() {
        let ingredients = ingredient_map(vec![
            ingredient("flour", Unit::Kilogram, "5.50"),
            ingredient("sugar", Unit::Kilogram, "4.00"),
        ]);
        let dough = recipe(
            "dough",
            vec![
                flour_line("200", Unit::Gram),
                RecipeItem::ingredient(IngredientId::new("sugar"), dec("100"), Unit::Gram),
            ],
            "1",
            Unit::Unit,
        );

        let cost = compute_recipe_cost(&dough, &ingredients, &recipe_map(vec![])).unwrap();
        assert_eq!(cost.total_cost, dec("1.50"));
        assert_eq!(cost.cost_per_yield_unit, dec("1.50"));
    }

    #[test]
    fn test_sub_recipe_cost_propagates() {
        let ingredients = ingredient_map(vec![ingredient("egg", Unit::Unit, "2.00")]);
        let filling = recipe(
            "filling",
            vec![RecipeItem::ingredient(IngredientId::new("egg"), dec("1"), Unit::Unit)],
            "1",
            Unit::Unit,
        );
        let cake = recipe("cake", vec![sub_line("filling", "3", Unit::Unit)], "1", Unit::Unit);
        let recipes = recipe_map(vec![filling, cake.clone()]);

        let cost = compute_recipe_cost(&cake, &ingredients, &recipes).unwrap();
        assert_eq!(cost.total_cost, dec("6.00"));
    }

    #[test]
    fn test_sub_recipe_quantity_converts_to_generated_unit() {
        let ingredients = ingredient_map(vec![ingredient("flour", Unit::Kilogram, "10.00")]);
        // 1 kg of frosting costs 10.00, so 250 g of it costs 2.50
        let frosting = recipe("frosting", vec![flour_line("1", Unit::Kilogram)], "1", Unit::Kilogram);
        let cake = recipe("cake", vec![sub_line("frosting", "250", Unit::Gram)], "1", Unit::Unit);
        let recipes = recipe_map(vec![frosting, cake.clone()]);

        let cost = compute_recipe_cost(&cake, &ingredients, &recipes).unwrap();
        assert_eq!(cost.total_cost, dec("2.50"));
    }

    #[test]
    fn test_two_recipe_cycle() {
        let a = recipe("a", vec![sub_line("b", "1", Unit::Unit)], "1", Unit::Unit);
        let b = recipe("b", vec![sub_line("a", "1", Unit::Unit)], "1", Unit::Unit);
        let recipes = recipe_map(vec![a.clone(), b]);

        let err = compute_recipe_cost(&a, &ingredient_map(vec![]), &recipes).unwrap_err();
        assert_eq!(
            err,
            CostingError::CyclicRecipeReference {
                cycle: vec![RecipeId::new("a"), RecipeId::new("b"), RecipeId::new("a")],
            }
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let a = recipe("a", vec![sub_line("a", "1", Unit::Unit)], "1", Unit::Unit);
        let recipes = recipe_map(vec![a.clone()]);

        let err = compute_recipe_cost(&a, &ingredient_map(vec![]), &recipes).unwrap_err();
        assert_eq!(
            err,
            CostingError::CyclicRecipeReference {
                cycle: vec![RecipeId::new("a"), RecipeId::new("a")],
            }
        );
    }

    #[test]
    fn test_cycle_below_the_top_recipe() {
        let top = recipe("top", vec![sub_line("b", "1", Unit::Unit)], "1", Unit::Unit);
        let b = recipe("b", vec![sub_line("c", "1", Unit::Unit)], "1", Unit::Unit);
        let c = recipe("c", vec![sub_line("b", "1", Unit::Unit)], "1", Unit::Unit);
        let recipes = recipe_map(vec![top.clone(), b, c]);

        let err = compute_recipe_cost(&top, &ingredient_map(vec![]), &recipes).unwrap_err();
        assert_eq!(
            err,
            CostingError::CyclicRecipeReference {
                cycle: vec![RecipeId::new("b"), RecipeId::new("c"), RecipeId::new("b")],
            }
        );
    }

    fn chain(depth: usize, close_loop: bool) -> HashMap<RecipeId, Recipe> {
        let last = depth - 1;
        (0..depth)
            .map(|i| {
                let item = if i < last {
                    sub_line(&format!("r{}", i + 1), "1", Unit::Unit)
                } else if close_loop {
                    sub_line("r0", "1", Unit::Unit)
                } else {
                    RecipeItem::ingredient(IngredientId::new("egg"), dec("1"), Unit::Unit)
                };
                recipe(&format!("r{i}"), vec![item], "1", Unit::Unit)
            })
            .map(|r| (r.id.clone(), r))
            .collect()
    }

    #[test]
    fn test_deep_chain_costs_without_overflow() {
        let ingredients = ingredient_map(vec![ingredient("egg", Unit::Unit, "0.75")]);
        let recipes = chain(50, false);
        let top = recipes.get(&RecipeId::new("r0")).unwrap();

        let cost = compute_recipe_cost(top, &ingredients, &recipes).unwrap();
        assert_eq!(cost.total_cost, dec("0.75"));
    }

    #[test]
    fn test_deep_cycle_is_detected() {
        let recipes = chain(50, true);
        let top = recipes.get(&RecipeId::new("r0")).unwrap();

        let err = compute_recipe_cost(top, &ingredient_map(vec![]), &recipes).unwrap_err();
        let CostingError::CyclicRecipeReference { cycle } = err else {
            panic!("expected a cyclic recipe reference");
        };
        assert_eq!(cycle.len(), 51);
        assert_eq!(cycle.first(), cycle.last());
    }

    #[test]
    fn test_unknown_references() {
        let cake = recipe("cake", vec![flour_line("1", Unit::Kilogram)], "1", Unit::Unit);
        let err = compute_recipe_cost(&cake, &ingredient_map(vec![]), &recipe_map(vec![])).unwrap_err();
        assert_eq!(err, CostingError::UnknownIngredient(IngredientId::new("flour")));

        let cake = recipe("cake", vec![sub_line("ghost", "1", Unit::Unit)], "1", Unit::Unit);
        let err = compute_recipe_cost(&cake, &ingredient_map(vec![]), &recipe_map(vec![])).unwrap_err();
        assert_eq!(err, CostingError::UnknownRecipe(RecipeId::new("ghost")));
    }

    #[test]
    fn test_incompatible_units_fail_the_whole_recipe() {
        let ingredients = ingredient_map(vec![ingredient("flour", Unit::Kilogram, "5.50")]);
        let cake = recipe(
            "cake",
            vec![flour_line("100", Unit::Gram), flour_line("1", Unit::Liter)],
            "1",
            Unit::Unit,
        );

        let err = compute_recipe_cost(&cake, &ingredients, &recipe_map(vec![])).unwrap_err();
        assert!(matches!(
            err,
            CostingError::IncompatibleUnits {
                from: Unit::Liter,
                to: Unit::Kilogram,
                ..
            }
        ));
    }

    #[test]
    fn test_non_positive_quantities_are_rejected() {
        let ingredients = ingredient_map(vec![ingredient("flour", Unit::Kilogram, "5.50")]);

        let cake = recipe("cake", vec![flour_line("0", Unit::Gram)], "1", Unit::Unit);
        let err = compute_recipe_cost(&cake, &ingredients, &recipe_map(vec![])).unwrap_err();
        assert!(matches!(err, CostingError::InvalidQuantity(_)));

        let cake = recipe("cake", vec![flour_line("100", Unit::Gram)], "0", Unit::Unit);
        let err = compute_recipe_cost(&cake, &ingredients, &recipe_map(vec![])).unwrap_err();
        assert!(matches!(err, CostingError::InvalidQuantity(_)));
    }

    #[test]
    fn test_rounding_happens_once_at_the_end() {
        // One unit of the glaze costs 1/3; three units must cost 1.00, not 3 * 0.33
        let ingredients = ingredient_map(vec![ingredient("sugar", Unit::Kilogram, "1.00")]);
        let glaze = recipe(
            "glaze",
            vec![RecipeItem::ingredient(IngredientId::new("sugar"), dec("1"), Unit::Kilogram)],
            "3",
            Unit::Unit,
        );
        let donut = recipe("donut", vec![sub_line("glaze", "3", Unit::Unit)], "1", Unit::Unit);
        let recipes = recipe_map(vec![glaze, donut.clone()]);

        let cost = compute_recipe_cost(&donut, &ingredients, &recipes).unwrap();
        assert_eq!(cost.rounded().total_cost, dec("1.00"));
        assert_eq!(
            round_money(dec("0.33")) * Decimal::from(3),
            dec("0.99"),
            "rounding each line first would lose a cent"
        );
    }

    #[test]
    fn test_shared_sub_recipe_is_costed_once_per_use() {
        let ingredients = ingredient_map(vec![ingredient("egg", Unit::Unit, "2.00")]);
        let cream = recipe(
            "cream",
            vec![RecipeItem::ingredient(IngredientId::new("egg"), dec("1"), Unit::Unit)],
            "1",
            Unit::Unit,
        );
        let layer = recipe("layer", vec![sub_line("cream", "1", Unit::Unit)], "1", Unit::Unit);
        let cake = recipe(
            "cake",
            vec![sub_line("cream", "2", Unit::Unit), sub_line("layer", "1", Unit::Unit)],
            "1",
            Unit::Unit,
        );
        let recipes = recipe_map(vec![cream, layer, cake.clone()]);

        let cost = compute_recipe_cost(&cake, &ingredients, &recipes).unwrap();
        assert_eq!(cost.total_cost, dec("6.00"));
    }

    #[test]
    fn test_item_costs_sum_to_total() {
        let ingredients = ingredient_map(vec![
            ingredient("flour", Unit::Kilogram, "5.50"),
            ingredient("egg", Unit::Unit, "0.80"),
        ]);
        let cream = recipe(
            "cream",
            vec![RecipeItem::ingredient(IngredientId::new("egg"), dec("2"), Unit::Unit)],
            "500",
            Unit::Gram,
        );
        let cake = recipe(
            "cake",
            vec![flour_line("300", Unit::Gram), sub_line("cream", "0.25", Unit::Kilogram)],
            "1",
            Unit::Unit,
        );
        let recipes = recipe_map(vec![cream, cake.clone()]);

        let lines = compute_item_costs(&cake, &ingredients, &recipes).unwrap();
        let total: Decimal = lines.iter().map(|line| line.cost).sum();
        let cost = compute_recipe_cost(&cake, &ingredients, &recipes).unwrap();
        assert_eq!(total, cost.total_cost);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].priced_quantity, dec("250"));
        assert_eq!(lines[1].priced_unit, Unit::Gram);
        assert_eq!(lines[1].cost, dec("0.80"));
    }
}
