//! Costing engine errors.

use rust_decimal::Decimal;
use thiserror::Error;

use bakehouse_core::{ConversionError, IngredientId, PackagingId, RecipeId, Unit, UnitFamily};

/// Domain-level failures raised by cost and price computations.
///
/// Every variant is returned synchronously to the immediate caller. A
/// computation that fails never yields a partial total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostingError {
    /// A non-positive quantity was supplied to conversion or costing.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Conversion was requested across unit families.
    #[error("incompatible units: cannot convert {from} ({from_family}) to {to} ({to_family})")]
    IncompatibleUnits {
        /// Unit the quantity was expressed in.
        from: Unit,
        /// Unit the quantity had to be expressed in.
        to: Unit,
        /// Family of `from`.
        from_family: UnitFamily,
        /// Family of `to`.
        to_family: UnitFamily,
    },

    /// An ingredient reference did not resolve.
    #[error("unknown ingredient: {0}")]
    UnknownIngredient(IngredientId),

    /// A recipe reference did not resolve.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(RecipeId),

    /// A packaging reference did not resolve.
    #[error("unknown packaging: {0}")]
    UnknownPackaging(PackagingId),

    /// A recipe directly or transitively references itself.
    #[error("cyclic recipe reference: {}", format_cycle(.cycle))]
    CyclicRecipeReference {
        /// Recipe IDs along the cycle, starting and ending with the same ID.
        cycle: Vec<RecipeId>,
    },

    /// Product pricing needed a recipe cost the caller did not supply.
    #[error("missing cost for recipe: {0}")]
    MissingRecipeCost(RecipeId),

    /// Product pricing needed a packaging cost the caller did not supply.
    #[error("missing cost for packaging: {0}")]
    MissingPackagingCost(PackagingId),
}

impl CostingError {
    /// Build an [`CostingError::InvalidQuantity`] naming the offending field.
    pub(crate) fn invalid_quantity(what: impl std::fmt::Display, value: Decimal) -> Self {
        Self::InvalidQuantity(format!("{what} must be greater than zero (got {value})"))
    }
}

impl From<ConversionError> for CostingError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidQuantity(value) => Self::invalid_quantity("quantity", value),
            ConversionError::IncompatibleUnits {
                from,
                to,
                from_family,
                to_family,
            } => Self::IncompatibleUnits {
                from,
                to,
                from_family,
                to_family,
            },
            ConversionError::UnknownUnit(unit) => Self::InvalidQuantity(format!("unknown unit: {unit}")),
        }
    }
}

fn format_cycle(cycle: &[RecipeId]) -> String {
    cycle
        .iter()
        .map(RecipeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
