//! Bakehouse Costing - recipe and product costing engine.
//!
//! # Architecture
//!
//! - [`models`] - Ingredient, packaging, recipe, product and settings records
//! - [`resolver`] - Lookup traits the engine reads records through
//! - [`catalog`] - Immutable in-memory snapshot of records, loaded from YAML or JSON
//! - [`services`] - Recipe cost aggregation, product pricing, breakdowns,
//!   dependency checks, scaling, stock movements and price history
//! - [`validation`] - Save-time field validation for records
//! - [`config`] - Environment configuration
//!
//! The engine is synchronous and pure. Records are fetched before any
//! arithmetic runs; every computation borrows an immutable snapshot and
//! either fully succeeds or fails with a [`CostingError`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod services;
pub mod validation;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, CostingConfig, LogFormat};
pub use error::CostingError;
pub use resolver::{IngredientResolver, PackagingResolver, RecipeResolver};
pub use services::product_pricing::{ProductPricing, compute_product_pricing};
pub use services::recipe_cost::{RecipeCost, compute_recipe_cost};
pub use validation::ValidationError;
