//! Runtime configuration read from the environment.
//!
//! | Variable            | Values                       | Default                         |
//! |---------------------|------------------------------|---------------------------------|
//! | `API_BASE_URL`      | URL prefix for every request | dev proxy in development        |
//! | `APP_MODE`          | `development`, `production`  | by build profile                |
//! | `API_LIST_ENVELOPE` | `bare`, `wrapped`            | `bare`                          |
//! | `API_TIMEOUT_SECS`  | positive integer             | `10`                            |
//! | `THEME`             | `light`, `dark`              | `light`                         |

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::theme::ThemeMode;

/// Where requests go in development when `API_BASE_URL` is unset.
pub const DEV_PROXY_URL: &str = "http://localhost:3000";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shape of the list response. Exactly one is accepted per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListEnvelope {
    /// `[{...}, ...]`
    #[default]
    Bare,
    /// `{"posts": [{...}, ...]}`
    Wrapped,
}

impl FromStr for ListEnvelope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bare" => Ok(ListEnvelope::Bare),
            "wrapped" => Ok(ListEnvelope::Wrapped),
            _ => Err(ConfigError::InvalidValue {
                key: "API_LIST_ENVELOPE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Development,
    Production,
}

impl AppMode {
    fn for_build() -> Self {
        if cfg!(debug_assertions) {
            AppMode::Development
        } else {
            AppMode::Production
        }
    }
}

impl FromStr for AppMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppMode::Development),
            "production" | "prod" => Ok(AppMode::Production),
            _ => Err(ConfigError::InvalidValue {
                key: "APP_MODE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub list_envelope: ListEnvelope,
    pub timeout: Duration,
    pub mode: AppMode,
    pub theme: ThemeMode,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = match get("APP_MODE") {
            Some(v) => v.parse()?,
            None => AppMode::for_build(),
        };

        let api_base_url = match (get("API_BASE_URL"), mode) {
            (Some(url), _) => url.trim().trim_end_matches('/').to_string(),
            (None, AppMode::Development) => DEV_PROXY_URL.to_string(),
            (None, AppMode::Production) => return Err(ConfigError::MissingBaseUrl),
        };

        let list_envelope = match get("API_LIST_ENVELOPE") {
            Some(v) => v.parse()?,
            None => ListEnvelope::default(),
        };

        let timeout = match get("API_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "API_TIMEOUT_SECS",
                        value: v,
                    })
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let theme = match get("THEME") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "THEME",
                value: v.clone(),
            })?,
            None => ThemeMode::default(),
        };

        Ok(Self {
            api_base_url,
            list_envelope,
            timeout,
            mode,
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn development_without_base_url_uses_proxy() {
        let cfg = config(&[("APP_MODE", "development")]).unwrap();
        assert_eq!(cfg.api_base_url, DEV_PROXY_URL);
        assert_eq!(cfg.list_envelope, ListEnvelope::Bare);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cfg.theme, ThemeMode::Light);
    }

    #[test]
    fn production_requires_base_url() {
        let err = config(&[("APP_MODE", "production")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingBaseUrl);

        let err = config(&[("APP_MODE", "production"), ("API_BASE_URL", "  ")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingBaseUrl);
    }

    #[test]
    fn base_url_overrides_proxy_and_loses_trailing_slash() {
        let cfg = config(&[
            ("APP_MODE", "development"),
            ("API_BASE_URL", "https://api.example.com/"),
        ])
        .unwrap();
        assert_eq!(cfg.api_base_url, "https://api.example.com");
    }

    #[test]
    fn reads_envelope_timeout_and_theme() {
        let cfg = config(&[
            ("APP_MODE", "prod"),
            ("API_BASE_URL", "https://api.example.com"),
            ("API_LIST_ENVELOPE", "Wrapped"),
            ("API_TIMEOUT_SECS", "3"),
            ("THEME", "dark"),
        ])
        .unwrap();
        assert_eq!(cfg.mode, AppMode::Production);
        assert_eq!(cfg.list_envelope, ListEnvelope::Wrapped);
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.theme, ThemeMode::Dark);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = config(&[("APP_MODE", "staging")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "APP_MODE", .. }));

        let err = config(&[("APP_MODE", "dev"), ("API_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "API_TIMEOUT_SECS", .. }));

        let err = config(&[("APP_MODE", "dev"), ("API_LIST_ENVELOPE", "both")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "API_LIST_ENVELOPE", .. }));

        let err = config(&[("APP_MODE", "dev"), ("THEME", "sepia")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "THEME", .. }));
    }
}
