//! Store client configuration.
//!
//! One base URL for the whole store API plus a request timeout. The timeout
//! is the only bound on a store call; the client never retries.

use url::Url;

/// Configuration for connecting to the off-chain store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store API, e.g. `https://tee.example.org`.
    pub api_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GRANTEE_API_URL` (required)
    /// - `GRANTEE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("GRANTEE_API_URL").map_err(|_| ConfigError::MissingApiUrl)?;
        Self::from_parts(&raw, std::env::var("GRANTEE_TIMEOUT_SECS").ok().as_deref())
    }

    /// Build from a raw URL and optional raw timeout, as read from the
    /// environment or CLI flags.
    pub fn from_parts(api_url: &str, timeout_secs: Option<&str>) -> Result<Self, ConfigError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| ConfigError::InvalidUrl(api_url.to_string(), e.to_string()))?;
        Ok(Self {
            api_url,
            timeout_secs: timeout_secs.and_then(|s| s.parse().ok()).unwrap_or(30),
        })
    }

    /// Configuration pointing at a local server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        let raw = format!("http://127.0.0.1:{port}");
        let api_url =
            Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw.clone(), e.to_string()))?;
        Ok(Self {
            api_url,
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GRANTEE_API_URL environment variable is required")]
    MissingApiUrl,
    #[error("invalid store URL {0:?}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_builds_valid_config() {
        let cfg = StoreConfig::local(9000).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn from_parts_defaults_timeout() {
        let cfg = StoreConfig::from_parts("https://store.example.org", None).unwrap();
        assert_eq!(cfg.timeout_secs, 30);
        let cfg = StoreConfig::from_parts("https://store.example.org", Some("nope")).unwrap();
        assert_eq!(cfg.timeout_secs, 30);
        let cfg = StoreConfig::from_parts("https://store.example.org", Some("7")).unwrap();
        assert_eq!(cfg.timeout_secs, 7);
    }

    #[test]
    fn from_parts_rejects_invalid_url() {
        assert!(matches!(
            StoreConfig::from_parts("not a url", None),
            Err(ConfigError::InvalidUrl(_, _))
        ));
    }
}
