//! Save-time validation for catalog records.
//!
//! Validation runs before a record is persisted and reports every failing
//! field at once, so a form can show all problems in one pass. The costing
//! engine itself assumes records already passed these checks and only guards
//! against the inputs that would otherwise fault (non-positive divisors).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Ingredient, Packaging, Product, Recipe, RecipeItem};

/// A single invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `recipe_items.2.quantity`).
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

const NAME_LEN: (usize, usize) = (2, 100);
const INSTRUCTION_LEN: (usize, usize) = (5, 1000);
const MAX_STEP_NUMBER: u32 = 999;
const MAX_STEP_MINUTES: u32 = 9999;
const MAX_SERVINGS: u32 = 999;
const MAX_PACKAGE_QUANTITY: i64 = 999;
const MAX_MARKUP: i64 = 500;

/// Largest amount any money or quantity field accepts.
fn max_amount() -> Decimal {
    Decimal::new(99_999_999, 2)
}

fn min_quantity() -> Decimal {
    Decimal::new(1, 3)
}

/// Accumulates field errors for one record.
#[derive(Debug, Default)]
struct Errors(Vec<ValidationError>);

impl Errors {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationError::new(field, message));
    }

    fn name(&mut self, field: &str, name: &str) {
        let len = name.trim().chars().count();
        if len < NAME_LEN.0 || len > NAME_LEN.1 {
            self.push(field, "name must be between 2 and 100 characters");
        }
    }

    fn range(&mut self, field: impl Into<String>, value: Decimal, min: Decimal, max: Decimal) {
        if value < min || value > max {
            self.push(field, format!("must be between {min} and {max} (got {value})"));
        }
    }

    fn finish(self) -> Result<(), Vec<ValidationError>> {
        if self.0.is_empty() { Ok(()) } else { Err(self.0) }
    }
}

/// Validate a recipe before saving it.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_recipe(recipe: &Recipe) -> Result<(), Vec<ValidationError>> {
    let mut errors = Errors::default();

    errors.name("name", &recipe.name);
    errors.range("generated_amount", recipe.generated_amount, min_quantity(), max_amount());
    if !(1..=MAX_SERVINGS).contains(&recipe.servings) {
        errors.push("servings", "servings must be between 1 and 999");
    }

    if recipe.recipe_items.is_empty() {
        errors.push("recipe_items", "recipe must have at least one item");
    }
    for (index, item) in recipe.recipe_items.iter().enumerate() {
        errors.range(
            format!("recipe_items.{index}.quantity"),
            item.quantity(),
            min_quantity(),
            max_amount(),
        );
        if let RecipeItem::SubRecipe { sub_recipe_id, .. } = item
            && sub_recipe_id == &recipe.id
        {
            errors.push(
                format!("recipe_items.{index}.sub_recipe_id"),
                "a recipe cannot use itself",
            );
        }
    }

    if recipe.instructions.is_empty() {
        errors.push("instructions", "recipe must have at least one instruction");
    }
    for (index, step) in recipe.instructions.iter().enumerate() {
        if !(1..=MAX_STEP_NUMBER).contains(&step.step_number) {
            errors.push(
                format!("instructions.{index}.step_number"),
                "step number must be between 1 and 999",
            );
        }
        let len = step.instruction.trim().chars().count();
        if len < INSTRUCTION_LEN.0 || len > INSTRUCTION_LEN.1 {
            errors.push(
                format!("instructions.{index}.instruction"),
                "instruction must be between 5 and 1000 characters",
            );
        }
        if step.time_minutes > MAX_STEP_MINUTES {
            errors.push(
                format!("instructions.{index}.time_minutes"),
                "step time must be between 0 and 9999 minutes",
            );
        }
    }

    errors.finish()
}

/// Validate a product before saving it.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_product(product: &Product) -> Result<(), Vec<ValidationError>> {
    let mut errors = Errors::default();

    errors.name("name", &product.name);
    errors.range("price", product.price, Decimal::new(1, 2), max_amount());
    errors.range("markup", product.markup, Decimal::ZERO, Decimal::from(MAX_MARKUP));

    if product.product_recipes.is_empty() {
        errors.push("product_recipes", "product must have at least one recipe");
    }
    for (index, item) in product.product_recipes.iter().enumerate() {
        errors.range(
            format!("product_recipes.{index}.portions"),
            item.portions,
            Decimal::new(1, 1),
            Decimal::new(99_999, 2),
        );
    }
    for (index, item) in product.product_packages.iter().enumerate() {
        errors.range(
            format!("product_packages.{index}.quantity"),
            item.quantity,
            Decimal::ONE,
            Decimal::from(MAX_PACKAGE_QUANTITY),
        );
    }

    errors.finish()
}

/// Validate an ingredient before saving it.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_ingredient(ingredient: &Ingredient) -> Result<(), Vec<ValidationError>> {
    let mut errors = Errors::default();
    stocked_item(
        &mut errors,
        &ingredient.name,
        ingredient.current_price,
        ingredient.measurement_value,
        ingredient.current_stock,
        ingredient.min_stock,
    );
    errors.finish()
}

/// Validate a packaging item before saving it.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_packaging(packaging: &Packaging) -> Result<(), Vec<ValidationError>> {
    let mut errors = Errors::default();
    stocked_item(
        &mut errors,
        &packaging.name,
        packaging.current_price,
        packaging.measurement_value,
        packaging.current_stock,
        packaging.min_stock,
    );
    errors.finish()
}

fn stocked_item(
    errors: &mut Errors,
    name: &str,
    price: Decimal,
    measurement_value: Decimal,
    current_stock: Decimal,
    min_stock: Decimal,
) {
    errors.name("name", name);
    errors.range("current_price", price, Decimal::ZERO, max_amount());
    if measurement_value <= Decimal::ZERO || measurement_value > max_amount() {
        errors.push(
            "measurement_value",
            format!("must be greater than 0 and at most {}", max_amount()),
        );
    }
    if current_stock < Decimal::ZERO {
        errors.push("current_stock", "stock cannot be negative");
    }
    if min_stock < Decimal::ZERO {
        errors.push("min_stock", "minimum stock cannot be negative");
    }
}
