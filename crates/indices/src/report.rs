use core_types::IndexMethod;
use serde::{Deserialize, Serialize};

/// The outcome of a single index computation.
///
/// This is the data transfer object handed to the CLI and to anything that
/// wants to serialize results alongside the inputs that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    pub method: IndexMethod,
    /// The normalized index value.
    pub value: f64,
    /// How many products took part after aligning the observation sets.
    pub matched_products: usize,
    pub normalization: f64,
}

impl IndexReport {
    /// The index expressed as a percentage change relative to the normalization base.
    pub fn change_pct(&self) -> f64 {
        (self.value / self.normalization - 1.0) * 100.0
    }
}
