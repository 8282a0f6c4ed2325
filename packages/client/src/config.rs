//! Client configuration, populated from environment variables or a builder.

use std::time::Duration;

use datacatalog::DEFAULT_API_VERSION;

/// Errors raised while assembling a client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A setting is present but unusable.
    #[error("invalid {name} {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Connection settings for a catalog account.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `CATALOG_ENDPOINT` | (required) | Catalog base URL, e.g. `https://acct.purview.azure.com/catalog` |
/// | `CATALOG_API_VERSION` | `2021-05-01-preview` | Value sent as `api-version` |
/// | `CATALOG_TOKEN` | (absent) | Static bearer token |
/// | `CATALOG_TIMEOUT_SECS` | `30` | Per-request timeout |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL that operation paths are appended to. No trailing slash.
    pub endpoint: String,

    pub api_version: String,

    /// Bearer token sent on every request, when set.
    pub token: Option<String>,

    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Defaults for everything but the endpoint.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: normalize_endpoint(endpoint.into())?,
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup("CATALOG_ENDPOINT").ok_or(ConfigError::Missing("CATALOG_ENDPOINT"))?;
        let mut config = Self::new(endpoint)?;

        if let Some(version) = lookup("CATALOG_API_VERSION").filter(|v| !v.is_empty()) {
            config.api_version = version;
        }
        config.token = lookup("CATALOG_TOKEN").filter(|t| !t.is_empty());

        if let Some(raw) = lookup("CATALOG_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "CATALOG_TIMEOUT_SECS",
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Check that `endpoint` is an absolute http(s) URL and strip trailing slashes.
fn normalize_endpoint(endpoint: String) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "endpoint",
        value: endpoint.clone(),
        reason,
    };
    let url = reqwest::Url::parse(&endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".into()));
    }
    if url.query().is_some() {
        return Err(invalid("endpoint must not carry a query string".into()));
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn endpoint_is_required() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CATALOG_ENDPOINT")));
    }

    #[test]
    fn defaults_apply() {
        let config = ClientConfig::from_lookup(lookup(&[(
            "CATALOG_ENDPOINT",
            "https://acct.purview.azure.com/catalog/",
        )]))
        .unwrap();
        assert_eq!(config.endpoint, "https://acct.purview.azure.com/catalog");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_apply() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CATALOG_ENDPOINT", "http://127.0.0.1:3030"),
            ("CATALOG_API_VERSION", "2022-03-01-preview"),
            ("CATALOG_TOKEN", "secret"),
            ("CATALOG_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_version, "2022-03-01-preview");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("CATALOG_ENDPOINT", "http://127.0.0.1:3030"),
            ("CATALOG_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "CATALOG_TIMEOUT_SECS", .. }));

        assert!(ClientConfig::new("not a url").is_err());
        assert!(ClientConfig::new("ftp://catalog.example").is_err());
    }
}
