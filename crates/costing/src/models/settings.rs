//! Pricing settings shared by every recipe.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::RecipeCategory;

use crate::validation::ValidationError;

/// Labor rate and profit margins used by cost breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeSettings {
    /// Cost of one hour of labor.
    pub labor_hour_rate: Decimal,
    /// Margin percentage for categories without their own entry.
    pub default_margin: Decimal,
    /// Margin percentage per recipe category.
    pub margins_by_category: HashMap<RecipeCategory, Decimal>,
}

impl Default for RecipeSettings {
    fn default() -> Self {
        let margins_by_category = [
            (RecipeCategory::Cakes, 150),
            (RecipeCategory::Cupcakes, 180),
            (RecipeCategory::Cookies, 200),
            (RecipeCategory::Breads, 120),
            (RecipeCategory::Pastries, 160),
            (RecipeCategory::Icings, 300),
            (RecipeCategory::Fillings, 250),
            (RecipeCategory::Other, 150),
        ]
        .into_iter()
        .map(|(category, margin)| (category, Decimal::from(margin)))
        .collect();

        Self {
            labor_hour_rate: Decimal::from(25),
            default_margin: Decimal::from(150),
            margins_by_category,
        }
    }
}

impl RecipeSettings {
    const MIN_MARGIN: Decimal = Decimal::ONE_HUNDRED;
    const MAX_MARGIN: Decimal = Decimal::ONE_THOUSAND;
    const MAX_LABOR_RATE: Decimal = Decimal::ONE_THOUSAND;

    /// Margin percentage for a category, falling back to the default.
    #[must_use]
    pub fn margin_for(&self, category: RecipeCategory) -> Decimal {
        self.margins_by_category
            .get(&category)
            .copied()
            .unwrap_or(self.default_margin)
    }

    /// Check every setting, reporting all violations at once.
    ///
    /// # Errors
    ///
    /// Returns the list of field errors if any setting is out of range.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.labor_hour_rate < Decimal::ZERO || self.labor_hour_rate > Self::MAX_LABOR_RATE {
            errors.push(ValidationError::new(
                "labor_hour_rate",
                "labor hour rate must be between 0 and 1000",
            ));
        }
        if !Self::margin_in_range(self.default_margin) {
            errors.push(ValidationError::new(
                "default_margin",
                "default margin must be between 100% and 1000%",
            ));
        }

        let mut categories: Vec<_> = self.margins_by_category.iter().collect();
        categories.sort_by_key(|(category, _)| category.as_str());
        for (category, margin) in categories {
            if !Self::margin_in_range(*margin) {
                errors.push(ValidationError::new(
                    format!("margins_by_category.{category}"),
                    "margin must be between 100% and 1000%",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn margin_in_range(margin: Decimal) -> bool {
        (Self::MIN_MARGIN..=Self::MAX_MARGIN).contains(&margin)
    }
}
