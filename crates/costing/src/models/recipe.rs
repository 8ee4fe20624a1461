//! Recipe domain model.
//!
//! A recipe consumes ingredients and, optionally, other recipes (a cake uses
//! a batch of frosting). Each line of a recipe is a [`RecipeItem`], which
//! references exactly one of the two.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::{
    IngredientId, RecipeCategory, RecipeDifficulty, RecipeId, RecipeItemId, Unit,
};

use super::ingredient::default_active;

/// A recipe that yields `generated_amount` of `generated_unit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: RecipeCategory,
    #[serde(default)]
    pub difficulty: RecipeDifficulty,
    /// Ingredient and sub-recipe lines.
    pub recipe_items: Vec<RecipeItem>,
    /// Preparation steps, in order.
    #[serde(default)]
    pub instructions: Vec<RecipeStep>,
    /// How much one batch yields.
    pub generated_amount: Decimal,
    /// Unit of `generated_amount`.
    pub generated_unit: Unit,
    /// Servings one batch yields.
    pub servings: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Recipe {
    /// Amount of `generated_unit` in one serving.
    ///
    /// Returns `None` when the recipe declares zero servings.
    #[must_use]
    pub fn portion_size(&self) -> Option<Decimal> {
        (self.servings > 0).then(|| self.generated_amount / Decimal::from(self.servings))
    }

    /// Total preparation time across all steps, in minutes.
    #[must_use]
    pub fn preparation_time(&self) -> u32 {
        self.instructions.iter().map(|step| step.time_minutes).sum()
    }

    /// IDs of every recipe this one uses directly.
    pub fn sub_recipe_ids(&self) -> impl Iterator<Item = &RecipeId> {
        self.recipe_items.iter().filter_map(RecipeItem::sub_recipe_id)
    }
}

/// One line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecipeItem {
    /// A raw ingredient, in any unit of the ingredient's family.
    Ingredient {
        #[serde(default)]
        id: Option<RecipeItemId>,
        ingredient_id: IngredientId,
        quantity: Decimal,
        unit: Unit,
        #[serde(default)]
        notes: Option<String>,
    },
    /// Another recipe, in any unit of that recipe's generated unit family.
    SubRecipe {
        #[serde(default)]
        id: Option<RecipeItemId>,
        sub_recipe_id: RecipeId,
        quantity: Decimal,
        unit: Unit,
        #[serde(default)]
        notes: Option<String>,
    },
}

impl RecipeItem {
    /// Shorthand for an ingredient line without an item ID or notes.
    #[must_use]
    pub const fn ingredient(ingredient_id: IngredientId, quantity: Decimal, unit: Unit) -> Self {
        Self::Ingredient {
            id: None,
            ingredient_id,
            quantity,
            unit,
            notes: None,
        }
    }

    /// Shorthand for a sub-recipe line without an item ID or notes.
    #[must_use]
    pub const fn sub_recipe(sub_recipe_id: RecipeId, quantity: Decimal, unit: Unit) -> Self {
        Self::SubRecipe {
            id: None,
            sub_recipe_id,
            quantity,
            unit,
            notes: None,
        }
    }

    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        match self {
            Self::Ingredient { quantity, .. } | Self::SubRecipe { quantity, .. } => *quantity,
        }
    }

    #[must_use]
    pub const fn unit(&self) -> Unit {
        match self {
            Self::Ingredient { unit, .. } | Self::SubRecipe { unit, .. } => *unit,
        }
    }

    /// The referenced recipe, if this is a sub-recipe line.
    #[must_use]
    pub const fn sub_recipe_id(&self) -> Option<&RecipeId> {
        match self {
            Self::SubRecipe { sub_recipe_id, .. } => Some(sub_recipe_id),
            Self::Ingredient { .. } => None,
        }
    }

    /// Copy of this line with its quantity replaced.
    #[must_use]
    pub fn with_quantity(&self, new_quantity: Decimal) -> Self {
        let mut item = self.clone();
        match &mut item {
            Self::Ingredient { quantity, .. } | Self::SubRecipe { quantity, .. } => {
                *quantity = new_quantity;
            }
        }
        item
    }
}

/// A single preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub step_number: u32,
    pub instruction: String,
    #[serde(default)]
    pub time_minutes: u32,
}
