//! Costing services.
//!
//! Every service is a plain function over borrowed records. None of them
//! perform I/O; callers load records first (see [`crate::catalog`]).

pub mod breakdown;
pub mod dependency;
pub mod price_history;
pub mod product_pricing;
pub mod recipe_cost;
pub mod scaling;
pub mod stock;
