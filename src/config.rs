//! Connection settings for the ReProv API.
//!
//! Clients never read the environment themselves: a [ReprovConfig] is built
//! by the caller (possibly with [ReprovConfig::from_env]) and passed to each
//! client's constructor.

use crate::auth::StaticToken;
use crate::errors::ConfigError;
use crate::types::ServiceUrl;

/// Environment variable holding the root URL of the ReProv API.
pub const BASE_URL_VAR: &str = "BASE_URL";
/// Environment variable holding a static API key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Where the ReProv API is, and optionally a static API key to use with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReprovConfig {
    pub service_url: ServiceUrl,
    pub api_key: Option<String>,
}

impl ReprovConfig {
    pub fn new(service_url: ServiceUrl) -> Self {
        Self {
            service_url,
            api_key: None,
        }
    }

    /// Set a static API key.
    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        Self {
            service_url: self.service_url,
            api_key: Some(api_key.into()),
        }
    }

    /// Read configuration from the process environment, after loading a `.env`
    /// file from the current directory or its ancestors if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenv::dotenv() {
            Ok(path) => log::debug!("loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(BASE_URL_VAR).ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let service_url = ServiceUrl::try_from(url)?;
        let api_key = lookup(API_KEY_VAR).filter(|k| !k.is_empty());
        Ok(Self {
            service_url,
            api_key,
        })
    }

    /// Get the configured API key as a token provider.
    pub fn token(&self) -> Option<StaticToken> {
        self.api_key.clone().map(StaticToken::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenProvider;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = ReprovConfig::from_lookup(lookup_in(&[
            ("BASE_URL", "http://localhost:8000"),
            ("API_KEY", "s3cr3t"),
        ]))
        .unwrap();
        assert_eq!(config.service_url.as_str(), "http://localhost:8000");
        assert_eq!(config.token().unwrap().access_token().unwrap(), "s3cr3t");
    }

    #[test]
    fn test_missing_base_url() {
        let err = ReprovConfig::from_lookup(lookup_in(&[("API_KEY", "s3cr3t")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BASE_URL")));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ReprovConfig::from_lookup(lookup_in(&[("BASE_URL", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Url(_)));
    }

    #[test]
    fn test_with_api_key() {
        let url = ServiceUrl::from_static("https://reprov.example.org");
        let config = ReprovConfig::new(url.clone());
        assert!(config.token().is_none());
        let config = config.with_api_key("s3cr3t");
        assert_eq!(config.service_url, url);
        assert_eq!(config.token().unwrap().access_token().unwrap(), "s3cr3t");
    }

    #[test]
    fn test_empty_api_key_is_none() {
        let config = ReprovConfig::from_lookup(lookup_in(&[
            ("BASE_URL", "https://reprov.example.org"),
            ("API_KEY", ""),
        ]))
        .unwrap();
        assert!(config.token().is_none());
    }
}
