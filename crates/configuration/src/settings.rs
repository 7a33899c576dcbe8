use crate::defaults::{
    DEFAULT_NORMALIZATION, DEFAULT_PRICE_COL, DEFAULT_PRODUCT_ID_COL, DEFAULT_QUANTITY_COL,
    DEFAULT_TIME_PERIOD_COL,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// The root configuration structure for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The value every index is normalized to (the "= 100" in "index = 100").
    pub normalization: f64,
    /// Where the panel adapter finds its data.
    pub columns: PanelColumns,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            normalization: DEFAULT_NORMALIZATION,
            columns: PanelColumns::default(),
        }
    }
}

impl Settings {
    /// Rejects settings that cannot produce a meaningful index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.normalization.is_finite() || self.normalization == 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "normalization must be a finite, non-zero number (got {})",
                self.normalization
            )));
        }
        self.columns.validate()
    }
}

/// Column-name overrides for a tidy panel table.
///
/// Each name is independently configurable. The names only tell the adapter
/// where to look; they never change formula semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelColumns {
    pub price: String,
    pub quantity: String,
    pub product_id: String,
    pub time_period: String,
}

impl Default for PanelColumns {
    fn default() -> Self {
        Self {
            price: DEFAULT_PRICE_COL.to_string(),
            quantity: DEFAULT_QUANTITY_COL.to_string(),
            product_id: DEFAULT_PRODUCT_ID_COL.to_string(),
            time_period: DEFAULT_TIME_PERIOD_COL.to_string(),
        }
    }
}

impl PanelColumns {
    pub fn with_price(mut self, name: impl Into<String>) -> Self {
        self.price = name.into();
        self
    }

    pub fn with_quantity(mut self, name: impl Into<String>) -> Self {
        self.quantity = name.into();
        self
    }

    pub fn with_product_id(mut self, name: impl Into<String>) -> Self {
        self.product_id = name.into();
        self
    }

    pub fn with_time_period(mut self, name: impl Into<String>) -> Self {
        self.time_period = name.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("price", &self.price),
            ("quantity", &self.quantity),
            ("product_id", &self.product_id),
            ("time_period", &self.time_period),
        ];
        for (role, name) in named {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "the {role} column name must not be empty"
                )));
            }
        }
        // The time period column doubles as the grouping key, so it cannot also be a value column.
        if [&self.price, &self.quantity, &self.product_id].contains(&&self.time_period) {
            return Err(ConfigError::ValidationError(format!(
                "the time period column '{}' is also used for another role",
                self.time_period
            )));
        }
        Ok(())
    }
}
