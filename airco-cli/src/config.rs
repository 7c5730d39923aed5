//! Display preferences read from `airco.toml`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_FILE: &str = "airco.toml";

/// Unit system used to display results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// °C, kg/s, kW, kJ/kg.
    #[default]
    Si,
    /// °F, lb/h, Btu/h, Btu/lb.
    Us,
}

/// Display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub units: UnitSystem,
    /// Digits after the decimal point.
    pub decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: UnitSystem::Si,
            decimals: 3,
        }
    }
}

/// Errors that may occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `airco.toml` in the working
    /// directory is used if present, and the defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_FILE);
                if !fallback.exists() {
                    tracing::debug!("no {DEFAULT_FILE} found, using default display settings");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(self, units: Option<UnitSystem>, decimals: Option<usize>) -> Self {
        Self {
            units: units.unwrap_or(self.units),
            decimals: decimals.unwrap_or(self.decimals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() -> Result<(), ConfigError> {
        assert_eq!(Config::from_toml("")?, Config::default());
        Ok(())
    }

    #[test]
    fn reads_units_and_decimals() -> Result<(), ConfigError> {
        let config = Config::from_toml("units = \"us\"\ndecimals = 1\n")?;
        assert_eq!(
            config,
            Config {
                units: UnitSystem::Us,
                decimals: 1
            }
        );
        Ok(())
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        assert!(matches!(
            Config::from_toml("colour = \"blue\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml("units = \"imperial\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn flags_override_the_file() -> Result<(), ConfigError> {
        let config = Config::from_toml("units = \"us\"")?.with_overrides(None, Some(5));
        assert_eq!(config.units, UnitSystem::Us);
        assert_eq!(config.decimals, 5);

        let config = config.with_overrides(Some(UnitSystem::Si), None);
        assert_eq!(config.units, UnitSystem::Si);
        assert_eq!(config.decimals, 5);
        Ok(())
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("does/not/exist/airco.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
