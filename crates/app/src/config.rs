//! Application configuration.
//!
//! Values are layered, later sources winning: built-in defaults, the
//! configuration file (`netconsole.toml` in the working directory unless a
//! path is given), `NETCONSOLE_*` environment variables, then command-line
//! flags.

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "netconsole.toml";

/// Prefix of the environment variables read as configuration.
pub const ENV_PREFIX: &str = "NETCONSOLE";

/// Settings of the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is unset (default: info)
    pub log_level: String,
    /// Largest document accepted by the detector, in bytes (default: 10MB)
    pub max_document_size: usize,
    /// Target of `convert` when `--to` is omitted (default: native)
    pub default_collection_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_document_size: 10 * 1024 * 1024, // 10MB
            default_collection_format: "native".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a file cannot be read or a value has the
    /// wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
