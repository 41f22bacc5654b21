//! Server configuration from the environment.

use std::str::FromStr;

use phrase_core::GlobalSettings;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Initial scheduler settings; adjustable at runtime through the settings API.
    pub settings: GlobalSettings,
}

impl Config {
    /// Read `HOST`, `PORT`, `REINSERTION_DISTANCE` and `MASTERY_THRESHOLD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = GlobalSettings::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            settings: GlobalSettings {
                reinsertion_distance: parse_or(
                    &lookup,
                    "REINSERTION_DISTANCE",
                    defaults.reinsertion_distance,
                )?,
                mastery_threshold: parse_or(&lookup, "MASTERY_THRESHOLD", defaults.mastery_threshold)?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
