//! Product pricing commands.
//!
//! # Usage
//!
//! ```bash
//! bh-cli product price prod_chocolate_cake
//! bh-cli product price --all
//! ```

use bakehouse_core::{MarginViability, ProductId};
use bakehouse_costing::models::Product;
use bakehouse_costing::{Catalog, ProductPricing};

use super::{CommandError, money};

/// Price a single product.
pub fn price(catalog: &Catalog, id: &str) -> Result<ProductPricing, CommandError> {
    let id = ProductId::new(id);
    let product = catalog
        .product(&id)
        .ok_or_else(|| CommandError::UnknownProduct(id.clone()))?;

    let pricing = catalog.price_product(product)?;
    log_pricing(product, &pricing);
    Ok(pricing)
}

/// Price every product in the catalog.
///
/// Products that cannot be priced are reported and counted; the command
/// fails after listing all of them.
pub fn price_all(catalog: &Catalog) -> Result<(), CommandError> {
    let mut failures = 0;
    for product in catalog.products() {
        match catalog.price_product(product) {
            Ok(pricing) => log_pricing(product, &pricing),
            Err(e) => {
                tracing::error!("{} ({}): {e}", product.name, product.id);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(CommandError::CheckFailed(failures));
    }
    Ok(())
}

fn log_pricing(product: &Product, pricing: &ProductPricing) {
    let rounded = pricing.rounded();
    match &product.sku {
        Some(sku) => tracing::info!("{} ({}, {sku})", product.name, product.id),
        None => tracing::info!("{} ({})", product.name, product.id),
    }
    tracing::info!("  Cost price: {}", money(rounded.cost_price));
    tracing::info!(
        "  Suggested price ({}% markup): {}",
        product.markup.normalize(),
        money(rounded.suggested_price)
    );
    tracing::info!("  Selling price: {}", money(product.price));

    let viability = pricing.viability();
    if viability == MarginViability::Good {
        tracing::info!("  Profit margin: {}% ({viability})", rounded.profit_margin);
    } else {
        tracing::warn!("  Profit margin: {}% ({viability})", rounded.profit_margin);
    }
}
