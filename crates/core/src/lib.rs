//! Bakehouse Core - Shared types library.
//!
//! This crate provides common types used across all Bakehouse components:
//! - `costing` - Recipe and product costing engine, catalog and back-office services
//! - `cli` - Command-line tools for costing reports and catalog checks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, measurement units and conversion, money helpers, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
