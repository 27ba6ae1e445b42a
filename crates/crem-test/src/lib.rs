//! Shared test fixtures for crem crates.
//!
//! - [`catchment`] - A small, fully wired catchment model
//! - [`assert`] - Float comparisons at a variable's precision
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! crem-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use crem_test::catchment::testing_model;
//!
//! let model = testing_model(Parameters::new());
//! ```

pub mod assert;
pub mod catchment;

pub use assert::assert_within_precision;
pub use catchment::{testing_model, RIVER_BANK_UNIT};
