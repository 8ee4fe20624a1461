//! Measurement units and conversion between them.
//!
//! Units are partitioned into families. Each unit has a fixed multiplicative
//! factor to its family's base unit (grams for mass, milliliters for volume,
//! single items for count). Conversion is only defined inside a family.
//!
//! ```
//! use bakehouse_core::{Unit, convert};
//! use rust_decimal::Decimal;
//!
//! let grams = convert(Decimal::new(15, 1), Unit::Kilogram, Unit::Gram).unwrap();
//! assert_eq!(grams, Decimal::from(1500));
//!
//! assert!(convert(Decimal::ONE, Unit::Kilogram, Unit::Liter).is_err());
//! ```

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised by [`convert`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Quantities must be strictly positive.
    #[error("quantity must be greater than zero (got {0})")]
    InvalidQuantity(Decimal),
    /// The units belong to different families.
    #[error("cannot convert {from} ({from_family}) to {to} ({to_family})")]
    IncompatibleUnits {
        /// Source unit.
        from: Unit,
        /// Target unit.
        to: Unit,
        /// Family of the source unit.
        from_family: UnitFamily,
        /// Family of the target unit.
        to_family: UnitFamily,
    },
    /// The input is not a known unit name or symbol.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// A set of units convertible among each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    Mass,
    Volume,
    Count,
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mass => write!(f, "mass"),
            Self::Volume => write!(f, "volume"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// A unit of measurement for ingredients, packaging and recipe yields.
///
/// Serializes as its long name (`kilogram`) and also accepts the symbol
/// (`kg`) when deserializing or parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[serde(alias = "g")]
    Gram,
    #[serde(alias = "kg")]
    Kilogram,
    #[serde(alias = "ml")]
    Milliliter,
    #[serde(alias = "l")]
    Liter,
    #[serde(alias = "un")]
    Unit,
    #[serde(alias = "dz")]
    Dozen,
    #[serde(alias = "cx")]
    Box,
    #[serde(alias = "kit")]
    Set,
    #[serde(alias = "rm")]
    Ream,
}

impl Unit {
    /// All supported units.
    pub const ALL: [Self; 9] = [
        Self::Gram,
        Self::Kilogram,
        Self::Milliliter,
        Self::Liter,
        Self::Unit,
        Self::Dozen,
        Self::Box,
        Self::Set,
        Self::Ream,
    ];

    /// The family this unit belongs to.
    #[must_use]
    pub const fn family(self) -> UnitFamily {
        match self {
            Self::Gram | Self::Kilogram => UnitFamily::Mass,
            Self::Milliliter | Self::Liter => UnitFamily::Volume,
            Self::Unit | Self::Dozen | Self::Box | Self::Set | Self::Ream => UnitFamily::Count,
        }
    }

    /// Multiplicative factor to the family base unit.
    ///
    /// A box or a set is purchased and consumed as one item, so both count
    /// as a single unit. A ream is 500 sheets.
    #[must_use]
    pub fn factor(self) -> Decimal {
        match self {
            Self::Gram | Self::Milliliter | Self::Unit | Self::Box | Self::Set => Decimal::ONE,
            Self::Kilogram | Self::Liter => Decimal::ONE_THOUSAND,
            Self::Dozen => Decimal::from(12),
            Self::Ream => Decimal::from(500),
        }
    }

    /// Long name, as stored in documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gram => "gram",
            Self::Kilogram => "kilogram",
            Self::Milliliter => "milliliter",
            Self::Liter => "liter",
            Self::Unit => "unit",
            Self::Dozen => "dozen",
            Self::Box => "box",
            Self::Set => "set",
            Self::Ream => "ream",
        }
    }

    /// Short symbol used on screens and reports.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Milliliter => "ml",
            Self::Liter => "l",
            Self::Unit => "un",
            Self::Dozen => "dz",
            Self::Box => "cx",
            Self::Set => "kit",
            Self::Ream => "rm",
        }
    }

    /// Whether a quantity in this unit can be expressed in `other`.
    #[must_use]
    pub fn is_compatible_with(self, other: Self) -> bool {
        self.family() == other.family()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|unit| unit.name() == needle || unit.symbol() == needle)
            .ok_or_else(|| ConversionError::UnknownUnit(s.to_owned()))
    }
}

/// Convert `value` expressed in `from` into `to`.
///
/// The result is exact decimal multiplication by `factor(from) / factor(to)`;
/// no rounding is applied here.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidQuantity`] if `value <= 0` and
/// [`ConversionError::IncompatibleUnits`] if the units belong to different
/// families.
pub fn convert(value: Decimal, from: Unit, to: Unit) -> Result<Decimal, ConversionError> {
    if value <= Decimal::ZERO {
        return Err(ConversionError::InvalidQuantity(value));
    }

    if !from.is_compatible_with(to) {
        return Err(ConversionError::IncompatibleUnits {
            from,
            to,
            from_family: from.family(),
            to_family: to.family(),
        });
    }

    if from == to {
        return Ok(value);
    }

    Ok(value * from.factor() / to.factor())
}
