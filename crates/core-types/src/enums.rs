use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The bilateral price index methods known to the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMethod {
    // Unweighted
    Jevons,
    Dutot,
    Carli,
    Bmw,
    // Weighted
    Laspeyres,
    Paasche,
    Fisher,
    Tornqvist,
    Walsh,
    SatoVartia,
}

impl IndexMethod {
    /// Every method, unweighted first.
    pub const ALL: [IndexMethod; 10] = [
        IndexMethod::Jevons,
        IndexMethod::Dutot,
        IndexMethod::Carli,
        IndexMethod::Bmw,
        IndexMethod::Laspeyres,
        IndexMethod::Paasche,
        IndexMethod::Fisher,
        IndexMethod::Tornqvist,
        IndexMethod::Walsh,
        IndexMethod::SatoVartia,
    ];

    /// The snake_case identifier used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            IndexMethod::Jevons => "jevons",
            IndexMethod::Dutot => "dutot",
            IndexMethod::Carli => "carli",
            IndexMethod::Bmw => "bmw",
            IndexMethod::Laspeyres => "laspeyres",
            IndexMethod::Paasche => "paasche",
            IndexMethod::Fisher => "fisher",
            IndexMethod::Tornqvist => "tornqvist",
            IndexMethod::Walsh => "walsh",
            IndexMethod::SatoVartia => "sato_vartia",
        }
    }

    /// Returns true if the method needs quantity data in any period.
    pub fn is_weighted(&self) -> bool {
        self.requires_base_quantities() || self.requires_compared_quantities()
    }

    pub fn requires_base_quantities(&self) -> bool {
        !matches!(
            self,
            IndexMethod::Jevons
                | IndexMethod::Dutot
                | IndexMethod::Carli
                | IndexMethod::Bmw
                | IndexMethod::Paasche
        )
    }

    pub fn requires_compared_quantities(&self) -> bool {
        !matches!(
            self,
            IndexMethod::Jevons
                | IndexMethod::Dutot
                | IndexMethod::Carli
                | IndexMethod::Bmw
                | IndexMethod::Laspeyres
        )
    }
}

impl fmt::Display for IndexMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndexMethod {
    type Err = CoreError;

    /// Accepts the snake_case name, ignoring case and treating `-` like `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "tornquist" | "toernqvist" => return Ok(IndexMethod::Tornqvist),
            "satovartia" => return Ok(IndexMethod::SatoVartia),
            _ => {}
        }
        IndexMethod::ALL
            .into_iter()
            .find(|m| m.name() == normalized)
            .ok_or_else(|| CoreError::InvalidInput("index method".to_string(), s.to_string()))
    }
}
