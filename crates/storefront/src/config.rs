//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SAFFRON_API_URL` - Base URL of the remote catalog service
//!
//! ## Optional
//! - `SAFFRON_LISTING_PAGE_SIZE` - Items per page for plain and category
//!   listings (default: 8)
//! - `SAFFRON_CACHE_TTL_SECS` - TTL for cached listing responses
//!   (default: 120)
//! - `SAFFRON_SESSION_TOKEN` - Bearer token attached to member-scoped calls

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_LISTING_PAGE_SIZE: u32 = 8;
const DEFAULT_CACHE_TTL_SECS: u64 = 120;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
///
/// Implements `Debug` manually to redact the session token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote catalog service, with a trailing slash.
    pub api_base_url: Url,
    /// Items per page for plain and category listings.
    pub listing_page_size: u32,
    /// How long cached listing responses stay fresh.
    pub cache_ttl: Duration,
    /// Bearer token for member-scoped calls, when a session exists.
    pub session_token: Option<SecretString>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("listing_page_size", &self.listing_page_size)
            .field("cache_ttl", &self.cache_ttl)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url("SAFFRON_API_URL", &get_required_env("SAFFRON_API_URL")?)?;
        let listing_page_size = parse_page_size(
            "SAFFRON_LISTING_PAGE_SIZE",
            &get_env_or_default("SAFFRON_LISTING_PAGE_SIZE", "8"),
        )?;
        let cache_ttl_secs = get_env_or_default("SAFFRON_CACHE_TTL_SECS", "120")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SAFFRON_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;
        let session_token = get_optional_env("SAFFRON_SESSION_TOKEN").map(SecretString::from);

        Ok(Self {
            api_base_url,
            listing_page_size,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            session_token,
        })
    }

    /// Configuration with defaults for everything but the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_base_url` is not a valid absolute URL.
    pub fn with_base_url(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url("SAFFRON_API_URL", api_base_url)?,
            listing_page_size: DEFAULT_LISTING_PAGE_SIZE,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            session_token: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and normalize the API base URL, ensuring a trailing slash so that
/// relative endpoint paths join under it rather than replacing the last
/// path segment.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "not a usable base URL".to_string(),
        ));
    }
    Ok(url)
}

/// Parse a page size, rejecting zero.
fn parse_page_size(var_name: &str, value: &str) -> Result<u32, ConfigError> {
    let size = value
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if size == 0 {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "page size must be at least 1".to_string(),
        ));
    }
    Ok(size)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_trailing_slash() {
        let url = parse_base_url("TEST", "https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("TEST", "https://api.example.com/v1/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let err = parse_base_url("TEST", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "TEST"));
    }

    #[test]
    fn test_parse_page_size_rejects_zero() {
        assert!(parse_page_size("TEST", "0").is_err());
        assert_eq!(parse_page_size("TEST", "6").unwrap(), 6);
    }

    #[test]
    fn test_with_base_url_defaults() {
        let config = StorefrontConfig::with_base_url("https://api.example.com").unwrap();
        assert_eq!(config.listing_page_size, 8);
        assert_eq!(config.cache_ttl, Duration::from_secs(120));
        assert!(config.session_token.is_none());
    }

    #[test]
    fn test_debug_redacts_session_token() {
        let mut config = StorefrontConfig::with_base_url("https://api.example.com").unwrap();
        config.session_token = Some(SecretString::from("super-secret-session-token"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-session-token"));
    }
}
