//! Core types for Bakehouse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;
pub mod unit;

pub use id::*;
pub use money::{CurrencyCode, MONEY_SCALE, Price, percent_of, round_money};
pub use status::*;
pub use unit::{ConversionError, Unit, UnitFamily, convert};
