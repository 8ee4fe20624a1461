//! CLI command implementations.

pub mod check;
pub mod convert;
pub mod product;
pub mod recipe;

use std::path::PathBuf;

use bakehouse_core::{Price, ProductId, RecipeId};
use bakehouse_costing::{Catalog, CatalogError, ConfigError, CostingConfig, CostingError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Costing(#[from] CostingError),

    #[error("Recipe not found in catalog: {0}")]
    UnknownRecipe(RecipeId),

    #[error("Product not found in catalog: {0}")]
    UnknownProduct(ProductId),

    #[error("Catalog check found {0} problem(s)")]
    CheckFailed(usize),
}

/// Load the catalog named on the command line or in `BAKEHOUSE_CATALOG`,
/// with environment overrides applied to its settings.
pub async fn load_catalog(
    explicit: Option<PathBuf>,
    config: &CostingConfig,
) -> Result<Catalog, CommandError> {
    let path = config.require_catalog_path(explicit)?;
    tracing::debug!("Loading catalog from {}", path.display());

    let catalog = Catalog::load(&path).await?;
    let settings = config.apply_to(catalog.settings().clone());
    Ok(catalog.with_settings(settings))
}

/// Format an amount as money, rounded to cents.
fn money(amount: Decimal) -> Price {
    Price::from_amount(amount)
}
