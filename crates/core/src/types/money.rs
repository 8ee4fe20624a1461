//! Money helpers using decimal arithmetic.
//!
//! Costs are carried at full decimal precision through every calculation and
//! rounded to [`MONEY_SCALE`] places only where they are displayed or
//! persisted. Rounding mid-computation compounds error across nested recipes.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places kept for displayed or persisted amounts.
pub const MONEY_SCALE: u32 = 2;

/// Round an amount to [`MONEY_SCALE`] places, midpoint away from zero.
///
/// ```
/// use bakehouse_core::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// assert_eq!(round_money(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
/// ```
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Apply a percentage to a value (`value * percent / 100`).
#[must_use]
pub fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    value * percent / Decimal::ONE_HUNDRED
}

/// A price with currency information, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the default currency.
    #[must_use]
    pub fn from_amount(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::default())
    }

    /// The amount rounded to [`MONEY_SCALE`] places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_money(self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.rounded();
        write!(f, "{} {amount:.2}", self.currency_code.symbol())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_keeps_two_places() {
        assert_eq!(round_money(Decimal::new(14999, 4)), Decimal::new(150, 2));
        assert_eq!(round_money(Decimal::new(1234, 3)), Decimal::new(123, 2));
    }

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(Decimal::new(125, 3)), Decimal::new(13, 2));
        assert_eq!(round_money(Decimal::new(135, 3)), Decimal::new(14, 2));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(
            percent_of(Decimal::new(1000, 2), Decimal::from(50)),
            Decimal::new(5, 0)
        );
    }

    #[test]
    fn test_price_display() {
        let price = Price::from_amount(Decimal::new(15, 1));
        assert_eq!(price.to_string(), "R$ 1.50");

        let price = Price::new(Decimal::new(19999, 3), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$ 20.00");
    }
}
