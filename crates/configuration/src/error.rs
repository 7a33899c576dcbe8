use thiserror::Error;

/// Errors raised while assembling `Settings`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be read or parsed: the settings file, or a
    /// `PRICE_INDEX__*` environment variable of the wrong type.
    #[error("Failed to load settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    ValidationError(String),
}
