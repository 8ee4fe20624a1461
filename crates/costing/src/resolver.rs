//! Lookup traits the costing engine reads records through.
//!
//! The engine never fetches anything itself. Callers resolve records up
//! front into something that implements these traits (a [`Catalog`] or a
//! plain map) and the computation borrows it for its whole duration.
//!
//! [`Catalog`]: crate::catalog::Catalog

use std::collections::HashMap;

use bakehouse_core::{IngredientId, PackagingId, RecipeId};

use crate::models::{Ingredient, Packaging, Recipe};

/// Resolves ingredient IDs to ingredient records.
pub trait IngredientResolver {
    /// Look up an ingredient, returning `None` if it does not exist.
    fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient>;
}

/// Resolves recipe IDs to recipe records.
pub trait RecipeResolver {
    /// Look up a recipe, returning `None` if it does not exist.
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe>;
}

/// Resolves packaging IDs to packaging records.
pub trait PackagingResolver {
    /// Look up a packaging item, returning `None` if it does not exist.
    fn packaging(&self, id: &PackagingId) -> Option<&Packaging>;
}

impl IngredientResolver for HashMap<IngredientId, Ingredient> {
    fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.get(id)
    }
}

impl RecipeResolver for HashMap<RecipeId, Recipe> {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.get(id)
    }
}

impl PackagingResolver for HashMap<PackagingId, Packaging> {
    fn packaging(&self, id: &PackagingId) -> Option<&Packaging> {
        self.get(id)
    }
}
