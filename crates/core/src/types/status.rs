//! Category and status enums for bakery records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recipe category. Each category can carry its own pricing margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    /// Cakes and large pastries.
    Cakes,
    /// Individual cupcakes.
    Cupcakes,
    /// Cookies and small bites.
    Cookies,
    /// Breads and rolls.
    Breads,
    /// Pastries and croissants.
    Pastries,
    /// Icings and frostings.
    Icings,
    /// Fillings and creams.
    Fillings,
    #[default]
    Other,
}

impl RecipeCategory {
    /// All recipe categories.
    pub const ALL: [Self; 8] = [
        Self::Cakes,
        Self::Cupcakes,
        Self::Cookies,
        Self::Breads,
        Self::Pastries,
        Self::Icings,
        Self::Fillings,
        Self::Other,
    ];

    /// Stored name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cakes => "cakes",
            Self::Cupcakes => "cupcakes",
            Self::Cookies => "cookies",
            Self::Breads => "breads",
            Self::Pastries => "pastries",
            Self::Icings => "icings",
            Self::Fillings => "fillings",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecipeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("invalid recipe category: {s}"))
    }
}

/// How much technique a recipe demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipeDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Ingredient category for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Flour,
    Sugar,
    Dairy,
    Eggs,
    Fats,
    Leavening,
    Flavoring,
    Nuts,
    Fruits,
    Chocolate,
    Spices,
    Preservatives,
    #[default]
    Other,
}

/// Packaging category for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackagingCategory {
    Box,
    Base,
    Topper,
    Carrier,
    Bag,
    Paper,
    Ribbon,
    #[default]
    Other,
}

/// Stock level relative to the minimum threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Above the minimum.
    Good,
    /// Above 50% of the minimum, up to the minimum itself.
    Low,
    /// At or below 50% of the minimum; reorder now.
    Critical,
    /// Nothing left.
    Out,
}

impl StockStatus {
    /// Classify a stock level against its minimum threshold.
    ///
    /// ```
    /// use bakehouse_core::StockStatus;
    /// use rust_decimal::Decimal;
    ///
    /// let min = Decimal::from(10);
    /// assert_eq!(StockStatus::classify(Decimal::from(12), min), StockStatus::Good);
    /// assert_eq!(StockStatus::classify(Decimal::from(10), min), StockStatus::Low);
    /// assert_eq!(StockStatus::classify(Decimal::from(5), min), StockStatus::Critical);
    /// assert_eq!(StockStatus::classify(Decimal::ZERO, min), StockStatus::Out);
    /// ```
    #[must_use]
    pub fn classify(current_stock: Decimal, min_stock: Decimal) -> Self {
        if current_stock <= Decimal::ZERO {
            return Self::Out;
        }
        if current_stock > min_stock {
            return Self::Good;
        }
        if current_stock * Decimal::TWO > min_stock {
            Self::Low
        } else {
            Self::Critical
        }
    }
}

/// Kind of stock movement recorded in the stock history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockMovementType {
    Adjustment,
    Purchase,
    Usage,
    Waste,
    Correction,
}

impl std::fmt::Display for StockMovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Adjustment => write!(f, "adjustment"),
            Self::Purchase => write!(f, "purchase"),
            Self::Usage => write!(f, "usage"),
            Self::Waste => write!(f, "waste"),
            Self::Correction => write!(f, "correction"),
        }
    }
}

/// Whether a product's profit margin is healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginViability {
    /// Margin above 20%.
    Good,
    /// Margin above 10%.
    Warning,
    /// Margin at or below 10%.
    Poor,
}

impl MarginViability {
    /// Classify a profit margin percentage.
    #[must_use]
    pub fn from_margin(margin_percent: Decimal) -> Self {
        if margin_percent > Decimal::from(20) {
            Self::Good
        } else if margin_percent > Decimal::TEN {
            Self::Warning
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for MarginViability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Direction of a price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_boundaries() {
        let min = Decimal::from(10);
        assert_eq!(
            StockStatus::classify(Decimal::new(101, 1), min),
            StockStatus::Good
        );
        assert_eq!(StockStatus::classify(Decimal::from(10), min), StockStatus::Low);
        assert_eq!(
            StockStatus::classify(Decimal::new(51, 1), min),
            StockStatus::Low
        );
        assert_eq!(StockStatus::classify(Decimal::from(5), min), StockStatus::Critical);
        assert_eq!(StockStatus::classify(Decimal::ZERO, min), StockStatus::Out);
    }

    #[test]
    fn test_stock_status_without_minimum() {
        assert_eq!(
            StockStatus::classify(Decimal::ONE, Decimal::ZERO),
            StockStatus::Good
        );
    }

    #[test]
    fn test_margin_viability() {
        assert_eq!(
            MarginViability::from_margin(Decimal::from(35)),
            MarginViability::Good
        );
        assert_eq!(
            MarginViability::from_margin(Decimal::from(20)),
            MarginViability::Warning
        );
        assert_eq!(
            MarginViability::from_margin(Decimal::TEN),
            MarginViability::Poor
        );
        assert_eq!(
            MarginViability::from_margin(Decimal::from(-5)),
            MarginViability::Poor
        );
    }

    #[test]
    fn test_recipe_category_round_trip() {
        for category in RecipeCategory::ALL {
            let parsed: RecipeCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("pies".parse::<RecipeCategory>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&StockMovementType::Purchase).unwrap();
        assert_eq!(json, "\"purchase\"");

        let parsed: IngredientCategory = serde_json::from_str("\"chocolate\"").unwrap();
        assert_eq!(parsed, IngredientCategory::Chocolate);
    }
}
