use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Product id → price (or quantity) for a single period.
///
/// Ordered so that every aggregation visits products in the same sequence and
/// floating-point sums are reproducible between calls.
pub type ObservationSet = BTreeMap<String, f64>;

/// Identifies a time period in a panel.
///
/// Integer periods (`0`, `1`, `202401`) and labelled periods (`"2024-Q1"`)
/// are both supported. Which one is the base is decided by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Period {
    Index(i64),
    Label(String),
}

impl Period {
    /// Parses a command-line value: integers become `Index`, anything else a `Label`.
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(i) => Period::Index(i),
            Err(_) => Period::Label(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Index(i) => write!(f, "{i}"),
            Period::Label(l) => f.write_str(l),
        }
    }
}

impl From<i64> for Period {
    fn from(value: i64) -> Self {
        Period::Index(value)
    }
}

impl From<i32> for Period {
    fn from(value: i32) -> Self {
        Period::Index(value.into())
    }
}

impl From<&str> for Period {
    fn from(value: &str) -> Self {
        Period::Label(value.to_string())
    }
}

impl From<String> for Period {
    fn from(value: String) -> Self {
        Period::Label(value)
    }
}
