use config::{Config, Environment, File};
use phub_domain::constants::{PACKETA_DYNAMIC, PACKETERY};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "shipping";
const ENV_PREFIX: &str = "PHUB";
const LIST_SEPARATOR: &str = ",";

/// Custom error type for config loading.
#[phub_derive::phub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest first:
/// 1. **Base File**: settings from a file (e.g., `shipping.toml`). Defaults to `"shipping"`
///    in the working directory; any format the `config` crate recognises by extension works.
/// 2. **Environment Overrides**: variables prefixed with `PHUB__`. Nested structures use
///    double underscores (e.g., `PHUB__DYNAMIC__ENABLED=false` maps to `dynamic.enabled`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file cannot be found, or its content
/// (after environment overrides) does not match the structure of `T`.
///
/// # Example
/// ```rust
/// use phub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct QuoteConfig {
///     weight: f64,
/// }
///
/// let cfg: QuoteConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with(path, environment())
}

/// The `PHUB__` environment source used by [`load_config`].
///
/// Values are parsed into booleans and numbers before deserialization. `allowed_methods`
/// of the built-in carriers take a comma separated list
/// (e.g. `PHUB__CARRIERS__PACKETERY__ALLOWED_METHODS=pickupPointDelivery,addressDelivery`).
#[must_use]
pub fn environment() -> Environment {
    let mut env = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .convert_case(config::Case::Snake)
        .try_parsing(true)
        .list_separator(LIST_SEPARATOR);

    for family in [PACKETERY, PACKETA_DYNAMIC] {
        let key = format!("carriers.{}.allowed_methods", family.to_lowercase());
        env = env.with_list_parse_key(&key);
    }
    env
}

/// Same as [`load_config`], with an explicit environment source.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with<T>(
    path: Option<impl AsRef<Path>>,
    environment: Environment,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(environment);

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
