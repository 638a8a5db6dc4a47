//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `KANAP_API_URL` - Catalog API base URL (default: `http://localhost:3000/api/`)
//! - `KANAP_DATA_DIR` - Directory holding the persisted cart (default: `.kanap`)
//! - `KANAP_HTTP_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `KANAP_CATALOG_CACHE_TTL_SECS` - Product cache lifetime (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3000/api/";
const DEFAULT_DATA_DIR: &str = ".kanap";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";
const DEFAULT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid catalog URL {0}: {1}")]
    InvalidApiUrl(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory for client-persisted state
    pub data_dir: PathBuf,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long fetched products stay cached
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let data_dir = PathBuf::from(get_env_or_default("KANAP_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self { catalog, data_dir })
    }

    /// Apply command-line overrides on top of the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not a usable base URL.
    pub fn with_overrides(
        mut self,
        api_url: Option<&str>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            self.catalog.base_url = parse_base_url(url)?;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        Ok(self)
    }
}

impl CatalogConfig {
    /// Configuration for a catalog at `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a usable base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(&get_env_or_default("KANAP_API_URL", DEFAULT_API_URL))?,
            timeout: Duration::from_secs(get_secs(
                "KANAP_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            cache_ttl: Duration::from_secs(get_secs(
                "KANAP_CATALOG_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a duration in whole seconds.
fn get_secs(key: &str, default: &str) -> Result<u64, ConfigError> {
    get_env_or_default(key, default)
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse and normalize a catalog base URL.
///
/// The URL must be http(s) and hierarchical; a trailing slash is added so
/// endpoint paths always nest under it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            "scheme must be http or https".to_string(),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            "URL cannot carry a path".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("http://localhost:3000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn test_parse_base_url_keeps_trailing_slash() {
        let url = parse_base_url(DEFAULT_API_URL).unwrap();
        assert_eq!(url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("ftp://example.com/api/"),
            Err(ConfigError::InvalidApiUrl(_, _))
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ConfigError::InvalidApiUrl(_, _))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig {
            catalog: CatalogConfig::new(DEFAULT_API_URL).unwrap(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
        .with_overrides(Some("https://shop.example.com/api"), Some(PathBuf::from("/tmp/k")))
        .unwrap();

        assert_eq!(
            config.catalog.base_url.as_str(),
            "https://shop.example.com/api/"
        );
        assert_eq!(config.data_dir, PathBuf::from("/tmp/k"));
    }

    #[test]
    fn test_overrides_none_keeps_values() {
        let config = StorefrontConfig {
            catalog: CatalogConfig::new(DEFAULT_API_URL).unwrap(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
        .with_overrides(None, None)
        .unwrap();

        assert_eq!(config.catalog.base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}
