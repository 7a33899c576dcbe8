//! Immutable defaults shared by the panel adapter, the CLI and the settings loader.

/// Default column name for prices in a panel table.
pub const DEFAULT_PRICE_COL: &str = "price";

/// Default column name for quantities in a panel table.
pub const DEFAULT_QUANTITY_COL: &str = "quantity";

/// Default column name for product ids in a panel table.
pub const DEFAULT_PRODUCT_ID_COL: &str = "product_id";

/// Default column name for time periods in a panel table.
pub const DEFAULT_TIME_PERIOD_COL: &str = "time_period";

/// Default value an index is normalized to.
pub const DEFAULT_NORMALIZATION: f64 = 100.0;

/// Prefix for environment variable overrides, e.g. `PRICE_INDEX__NORMALIZATION=1`.
pub const ENV_PREFIX: &str = "PRICE_INDEX";
