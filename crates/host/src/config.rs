//! Host configuration loaded from environment variables.

use application::ApplicationSettings;
use thiserror::Error;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be 'pretty' or 'json', got '{value}'")]
    InvalidLogFormat { name: &'static str, value: String },

    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("DEFAULT_PAGE_SIZE ({default}) must not exceed MAX_PAGE_SIZE ({max})")]
    PageSizeOutOfRange { default: u32, max: u32 },
}

/// Host configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `pretty` or `json` (default: `pretty`)
/// - `DEFAULT_PAGE_SIZE` — page size when a query gives none (default: `20`)
/// - `MAX_PAGE_SIZE` — largest page size a query may ask for (default: `100`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    pub log_format: LogFormat,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let log_format = match lookup("LOG_FORMAT") {
            None => defaults.log_format,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidLogFormat {
                        name: "LOG_FORMAT",
                        value,
                    });
                }
            },
        };

        let config = Self {
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            log_format,
            default_page_size: number(&lookup, "DEFAULT_PAGE_SIZE", defaults.default_page_size)?,
            max_page_size: number(&lookup, "MAX_PAGE_SIZE", defaults.max_page_size)?,
        };
        if config.default_page_size > config.max_page_size {
            return Err(ConfigError::PageSizeOutOfRange {
                default: config.default_page_size,
                max: config.max_page_size,
            });
        }
        Ok(config)
    }

    /// Paging settings for the application layer.
    pub fn application_settings(&self) -> ApplicationSettings {
        ApplicationSettings {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

fn number(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        },
    }
}

impl Default for Config {
    fn default() -> Self {
        let settings = ApplicationSettings::default();
        Self {
            log_filter: "info".to_string(),
            log_format: LogFormat::Pretty,
            default_page_size: settings.default_page_size,
            max_page_size: settings.max_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("RUST_LOG", "debug,store=trace"),
            ("LOG_FORMAT", "JSON"),
            ("DEFAULT_PAGE_SIZE", "50"),
            ("MAX_PAGE_SIZE", "200"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "debug,store=trace");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.application_settings(),
            ApplicationSettings {
                default_page_size: 50,
                max_page_size: 200,
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("LOG_FORMAT", "xml")])),
            Err(ConfigError::InvalidLogFormat {
                name: "LOG_FORMAT",
                value: "xml".into(),
            })
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("MAX_PAGE_SIZE", "0")])),
            Err(ConfigError::InvalidNumber {
                name: "MAX_PAGE_SIZE",
                value: "0".into(),
            })
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("DEFAULT_PAGE_SIZE", "150")])),
            Err(ConfigError::PageSizeOutOfRange {
                default: 150,
                max: 100,
            })
        );
    }
}
