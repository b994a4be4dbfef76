//! Configuration for Postmock

use crate::error::{Error, Result};

/// Base URL of the Postman management API.
pub const POSTMAN_API_BASE_URL: &str = "https://api.getpostman.com";

/// Environment variable holding the Postman API key.
pub const POSTMAN_API_KEY_VAR: &str = "POSTMAN_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent as `X-API-Key` on every management-API request
    pub api_key: String,

    /// Base URL of the management API (overridable for tests)
    pub base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Build config from the environment. The API key is required; there is
    /// no implicit global fallback.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(POSTMAN_API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "{} environment variable is required. \
                     Please create a .env file with your Postman API key.",
                    POSTMAN_API_KEY_VAR
                ))
            })?;

        Ok(Self::new(api_key, POSTMAN_API_BASE_URL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_values() {
        let config = Config::new("key-123", "http://localhost:9999");
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.base_url, "http://localhost:9999");
    }
}
