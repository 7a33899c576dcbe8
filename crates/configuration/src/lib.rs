use crate::defaults::ENV_PREFIX;
use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod defaults;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use defaults::{
    DEFAULT_NORMALIZATION, DEFAULT_PRICE_COL, DEFAULT_PRODUCT_ID_COL, DEFAULT_QUANTITY_COL,
    DEFAULT_TIME_PERIOD_COL,
};
pub use settings::{PanelColumns, Settings};

/// Loads the application settings.
///
/// Sources are layered in this order, later ones winning:
/// 1. built-in defaults,
/// 2. the TOML file at `path`, if given (it must exist),
/// 3. `PRICE_INDEX__*` environment variables, e.g. `PRICE_INDEX__COLUMNS__PRICE=unit_value`.
///
/// The merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "Loading settings file.");
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let builder = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const ENV_PRICE: &str = "PRICE_INDEX__COLUMNS__PRICE";
    const ENV_NORMALIZATION: &str = "PRICE_INDEX__NORMALIZATION";

    fn clear_env() {
        // SAFETY: every test touching the environment runs under `#[serial]`.
        unsafe {
            std::env::remove_var(ENV_PRICE);
            std::env::remove_var(ENV_NORMALIZATION);
        }
    }

    #[test]
    #[serial]
    fn test_load_from_toml_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("price-index.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "normalization = 1.0\n\n[columns]\nprice = \"unit_value\"\ntime_period = \"month\""
        )
        .unwrap();

        let settings = load_config(Some(&path)).unwrap();
        assert_eq!(settings.normalization, 1.0);
        assert_eq!(settings.columns.price, "unit_value");
        assert_eq!(settings.columns.time_period, "month");
        // Untouched keys keep their defaults.
        assert_eq!(settings.columns.quantity, DEFAULT_QUANTITY_COL);
        assert_eq!(settings.columns.product_id, DEFAULT_PRODUCT_ID_COL);
    }

    #[test]
    #[serial]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
        assert!(err.to_string().starts_with("Failed to load settings: "));
    }

    #[test]
    #[serial]
    fn test_invalid_file_values_fail_validation() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.toml");
        std::fs::write(&path, "normalization = 0.0\n").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("price-index.toml");
        std::fs::write(
            &path,
            "normalization = 100.0\n\n[columns]\nprice = \"unit_value\"\nquantity = \"volume\"\n",
        )
        .unwrap();

        clear_env();
        // SAFETY: serialized with the other environment tests.
        unsafe {
            std::env::set_var(ENV_PRICE, "list_price");
            std::env::set_var(ENV_NORMALIZATION, "1");
        }
        let settings = load_config(Some(&path));
        clear_env();

        let settings = settings.unwrap();
        assert_eq!(settings.normalization, 1.0);
        assert_eq!(settings.columns.price, "list_price");
        // Keys without an environment value keep the file's.
        assert_eq!(settings.columns.quantity, "volume");
        assert_eq!(settings.columns.time_period, DEFAULT_TIME_PERIOD_COL);
    }

    #[test]
    #[serial]
    fn test_environment_alone_without_file() {
        clear_env();
        // SAFETY: serialized with the other environment tests.
        unsafe {
            std::env::set_var(ENV_NORMALIZATION, "0");
        }
        let result = load_config(None);
        clear_env();

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        assert_eq!(load_config(None).unwrap().normalization, DEFAULT_NORMALIZATION);
    }
}
