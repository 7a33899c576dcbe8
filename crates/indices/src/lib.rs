//! # Price Index Formulas
//!
//! This crate provides the bilateral price index formulas: scalar measures of
//! aggregate price change between a base period and a compared period for a
//! basket of products.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of tables,
//!   files or the command line. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every formula is a pure function of its
//!   observation sets. Nothing is cached and inputs are never mutated.
//! - **Matched Products:** A product takes part only if it is present in every
//!   observation set the formula needs; the rest are excluded without error.
//!
//! ## Public API
//!
//! - Unweighted: `jevons_index`, `dutot_index`, `carli_index`, `bmw_index`.
//! - Weighted: `laspeyres_index`, `paasche_index`, `fisher_index`,
//!   `tornqvist_index`, `walsh_index`, `sato_vartia_index`.
//! - `IndexCalculator`: dispatches an `IndexMethod` over `IndexInputs`.
//! - `IndexReport`: a computed value plus the size of the matched basket.
//! - `IndexError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod matching;
pub mod report;
pub mod unweighted;
pub mod weighted;

// Re-export the key components to create a clean, public-facing API.
pub use core_types::{IndexMethod, ObservationSet};
pub use engine::{IndexCalculator, IndexInputs};
pub use error::IndexError;
pub use report::IndexReport;
pub use unweighted::{bmw_index, carli_index, dutot_index, jevons_index};
pub use weighted::{
    fisher_index, laspeyres_index, paasche_index, sato_vartia_index, tornqvist_index, walsh_index,
};
