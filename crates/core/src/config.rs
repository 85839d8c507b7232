//! Client configuration read from `SEAMART_*` environment variables.
//!
//! Unset variables fall back to defaults silently; set-but-invalid values
//! fall back with a warning.

use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, FALLBACK_LOCALE, MAX_PAGE_SIZE,
};

pub const ENV_API_URL: &str = "SEAMART_API_URL";
pub const ENV_API_TOKEN: &str = "SEAMART_API_TOKEN";
pub const ENV_PAGE_SIZE: &str = "SEAMART_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "SEAMART_TIMEOUT_SECS";
pub const ENV_LOCALE: &str = "SEAMART_LOCALE";
pub const ENV_DATA_DIR: &str = "SEAMART_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub locale: String,
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            locale: FALLBACK_LOCALE.to_owned(),
            data_dir: default_data_dir(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let page_size: u32 = parse_or_default(ENV_PAGE_SIZE, non_empty(ENV_PAGE_SIZE), defaults.page_size);
        Self {
            api_url: non_empty(ENV_API_URL)
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.api_url),
            api_token: non_empty(ENV_API_TOKEN),
            page_size: clamp_page_size(page_size),
            timeout_secs: parse_or_default(
                ENV_TIMEOUT_SECS,
                non_empty(ENV_TIMEOUT_SECS),
                defaults.timeout_secs,
            ),
            locale: non_empty(ENV_LOCALE).unwrap_or(defaults.locale),
            data_dir: non_empty(ENV_DATA_DIR).map(PathBuf::from).unwrap_or(defaults.data_dir),
        }
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(crate::constants::DATABASE_FILE_NAME)
    }
}

/// Keeps a page size within `1..=MAX_PAGE_SIZE`.
#[must_use]
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

fn parse_or_default<T>(var: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(var, value = %raw, default = %default, "invalid env var value, using default");
            default
        },
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("seamart")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_vars_use_defaults() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.api_token, None);
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn set_vars_override_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, "https://api.example.test/v1/"),
            (ENV_API_TOKEN, "secret"),
            (ENV_PAGE_SIZE, "25"),
            (ENV_LOCALE, "ar"),
            (ENV_DATA_DIR, "/tmp/seamart-test"),
        ]));
        assert_eq!(config.api_url, "https://api.example.test/v1");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.locale, "ar");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/seamart-test/seamart.db"));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_PAGE_SIZE, "banana"),
            (ENV_TIMEOUT_SECS, "-3"),
        ]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn page_size_is_clamped() {
        let big = ClientConfig::from_lookup(lookup_from(&[(ENV_PAGE_SIZE, "5000")]));
        assert_eq!(big.page_size, MAX_PAGE_SIZE);
        let zero = ClientConfig::from_lookup(lookup_from(&[(ENV_PAGE_SIZE, "0")]));
        assert_eq!(zero.page_size, 1);
    }

    #[test]
    fn blank_token_is_none() {
        let config = ClientConfig::from_lookup(lookup_from(&[(ENV_API_TOKEN, "  ")]));
        assert_eq!(config.api_token, None);
    }
}
