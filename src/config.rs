// src/config.rs

use std::env;
use thiserror::Error;
use url::Url;

/// Google Sheets gviz export of the tracking sheet.
pub const DEFAULT_SHEET_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/12GZO7YJU-VP3jWDekHqzeWwH3rYSwqzwsKbq6UuiEYg/gviz/tq?tqx=out:csv&sheet=Sheet1";

/// Cloud Run default.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("SHEET_CSV_URL is not a valid URL ({value}): {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sheet_url: Url,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    /// Reads `SHEET_CSV_URL`, `PORT` and `LOG_LEVEL`, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = get("SHEET_CSV_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SHEET_CSV_URL.to_string());
        let sheet_url = Url::parse(raw_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            value: raw_url.clone(),
            source,
        })?;

        let port = match get("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(p.clone()))?,
            None => DEFAULT_PORT,
        };

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            sheet_url,
            port,
            log_level,
        })
    }
}
