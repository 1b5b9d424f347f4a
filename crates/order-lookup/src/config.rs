//! # Endpoint Configuration
//!
//! The lookup endpoint and request timeout, injected into the widget at
//! construction. Defaults match the local order API
//! (`http://localhost:8081/order/`, no timeout).
//!
//! ## Environment Variables
//!
//! [`LookupConfig::from_env`] loads a `.env` file first (if present), then reads:
//!
//! - `ORDER_API_URL` - full endpoint, e.g. `http://orders.internal/order/`
//! - `API_PORT` - port of the API on localhost, used when `ORDER_API_URL` is unset
//! - `ORDER_API_TIMEOUT_SECS` - request timeout in whole seconds
//!
//! Unset variables keep their defaults. Malformed values are rejected.

use crate::error::ConfigError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8081/order/";

pub const ENV_ENDPOINT: &str = "ORDER_API_URL";
pub const ENV_PORT: &str = "API_PORT";
pub const ENV_TIMEOUT: &str = "ORDER_API_TIMEOUT_SECS";

/// Where and how the widget sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    endpoint: Url,
    timeout: Option<Duration>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: None,
        }
    }
}

impl LookupConfig {
    /// Builds a config for `endpoint`. A trailing `/` is added when missing so
    /// that appending the identifier never replaces the last path segment.
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Loads `.env` and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key/value source. `ORDER_API_URL` wins over `API_PORT`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match (non_empty(&lookup, ENV_ENDPOINT), non_empty(&lookup, ENV_PORT)) {
            (Some(endpoint), _) => Self::new(&endpoint)?,
            (None, Some(port)) => {
                let port: u16 = port
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
                Self::new(&format!("http://localhost:{port}/order/"))?
            }
            (None, None) => Self::default(),
        };

        if let Some(raw) = non_empty(&lookup, ENV_TIMEOUT) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".into()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_endpoint() {
        let config = LookupConfig::default();
        assert_eq!(config.endpoint().as_str(), "http://localhost:8081/order/");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_trailing_slash_added() {
        let config = LookupConfig::new("http://example.com/api/order").unwrap();
        assert_eq!(config.endpoint().as_str(), "http://example.com/api/order/");
    }

    #[test]
    fn test_rejects_non_http() {
        assert!(matches!(
            LookupConfig::new("mailto:orders@example.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            LookupConfig::new("ftp://example.com/order/"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(LookupConfig::new("not a url").is_err());
    }

    #[test]
    fn test_from_vars_empty_keeps_defaults() {
        let config = LookupConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, LookupConfig::default());
    }

    #[test]
    fn test_from_vars_port() {
        let config = LookupConfig::from_vars(vars(&[(ENV_PORT, "9090")])).unwrap();
        assert_eq!(config.endpoint().as_str(), "http://localhost:9090/order/");
    }

    #[test]
    fn test_from_vars_url_wins_over_port() {
        let config = LookupConfig::from_vars(vars(&[
            (ENV_ENDPOINT, "https://orders.example.com/v1/order/"),
            (ENV_PORT, "9090"),
        ]))
        .unwrap();
        assert_eq!(
            config.endpoint().as_str(),
            "https://orders.example.com/v1/order/"
        );
    }

    #[test]
    fn test_from_vars_timeout() {
        let config = LookupConfig::from_vars(vars(&[(ENV_TIMEOUT, "5")])).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_vars_rejects_garbage() {
        assert_eq!(
            LookupConfig::from_vars(vars(&[(ENV_PORT, "eighty")])),
            Err(ConfigError::InvalidPort("eighty".into()))
        );
        assert_eq!(
            LookupConfig::from_vars(vars(&[(ENV_TIMEOUT, "1.5")])),
            Err(ConfigError::InvalidTimeout("1.5".into()))
        );
    }
}
