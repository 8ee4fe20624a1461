//! Integration tests for Bakehouse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bakehouse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `recipe_costing` - Recipe costs, breakdowns, scaling and cycle checks
//! - `product_pricing` - Product cost price, suggested price and margin
//! - `inventory` - Stock movements and price changes feeding back into costs
//!
//! Every test loads the fixture catalog in `fixtures/bakery.yaml`, a small
//! bakery with a chocolate cake that uses a ganache sub-recipe.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bakehouse_costing::{Catalog, CatalogError};
use rust_decimal::Decimal;

/// Absolute path of a file under `fixtures/`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Load the bakery fixture catalog.
///
/// # Errors
///
/// Returns `CatalogError` if the fixture is missing or malformed.
pub async fn load_bakery() -> Result<Catalog, CatalogError> {
    Catalog::load(fixture_path("bakery.yaml")).await
}

/// Parse a decimal literal.
///
/// # Panics
///
/// Panics if `s` is not a valid decimal, so a typo in an expected value
/// fails the test instead of comparing against zero.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
