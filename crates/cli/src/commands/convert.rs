//! Unit conversion command.
//!
//! # Usage
//!
//! ```bash
//! bh-cli convert 2 dozen unit
//! bh-cli convert 750 ml l
//! ```

use bakehouse_core::{ConversionError, Unit, convert as convert_units};
use rust_decimal::Decimal;

/// Convert `value` from one unit to another and report the result.
pub fn convert(value: Decimal, from: Unit, to: Unit) -> Result<Decimal, ConversionError> {
    let converted = convert_units(value, from, to)?;
    tracing::info!(
        "{} {} = {} {}",
        value.normalize(),
        from,
        converted.normalize(),
        to
    );
    Ok(converted)
}
