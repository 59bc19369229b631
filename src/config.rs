//! API configuration: endpoint, credential, page size, and HTTP timeouts.
//!
//! The access key is never embedded in source. It is injected from the
//! environment at startup, and the [`Debug`] impl omits it so the key
//! cannot end up in logs or panic output.

use thiserror::Error;

/// Default search API base URL (Unsplash-compatible).
pub const DEFAULT_API_BASE_URL: &str = "https://api.unsplash.com";

/// Fixed number of results requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default connect timeout for API and asset requests, in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout for API and asset requests, in seconds.
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the API access key.
pub const ACCESS_KEY_ENV: &str = "IMGFETCH_ACCESS_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "IMGFETCH_API_BASE_URL";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The access key environment variable is unset or empty.
    #[error("missing API access key: set {env} to your API access key")]
    MissingAccessKey {
        /// Name of the environment variable that was consulted.
        env: &'static str,
    },

    /// A configuration value is outside its accepted range.
    #[error("invalid config value for `{field}`: {value}. Expected range: {expected}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, rendered as text.
        value: String,
        /// Human-readable accepted range.
        expected: &'static str,
    },
}

/// Resolved configuration for the search API and asset downloads.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the search API, without a trailing slash.
    pub base_url: String,
    /// Access key sent as the `client_id` query parameter.
    pub access_key: String,
    /// Results requested per page.
    pub page_size: u32,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    pub read_timeout_secs: u64,
}

impl ApiConfig {
    /// Builds a config with the given access key and default settings.
    #[must_use]
    pub fn with_access_key(access_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            access_key: access_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }

    /// Loads configuration from the environment.
    ///
    /// Reads the access key from [`ACCESS_KEY_ENV`] and an optional base URL
    /// override from [`BASE_URL_ENV`]. Trailing slashes on the base URL are
    /// stripped so path joins stay predictable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccessKey`] when the key variable is
    /// unset or blank, and [`ConfigError::InvalidValue`] when validation of
    /// the assembled config fails.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_key = std::env::var(ACCESS_KEY_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingAccessKey {
                env: ACCESS_KEY_ENV,
            })?;

        let mut config = Self::with_access_key(access_key);

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            let trimmed = base_url.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                config.base_url = trimmed.to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates config values against accepted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_key.trim().is_empty() {
            return Err(ConfigError::MissingAccessKey {
                env: ACCESS_KEY_ENV,
            });
        }
        if !(1..=30).contains(&self.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                value: self.page_size.to_string(),
                expected: "1..=30",
            });
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if !(1..=3600).contains(&value) {
        return Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            expected: "1..=3600",
        });
    }
    Ok(())
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // access_key intentionally omitted
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("read_timeout_secs", &self.read_timeout_secs)
            .finish_non_exhaustive()
    }
}
