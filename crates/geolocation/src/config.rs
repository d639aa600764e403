//! Geocoding client configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Google Maps geocoding client
///
/// Read-only after construction. The API key is never picked up from the
/// environment; callers pass it in explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// API host, optionally with a port
    #[serde(default = "default_host")]
    pub host: String,

    /// Endpoint path on the host
    #[serde(default = "default_path")]
    pub path: String,

    /// Google Maps API key (forces HTTPS when set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Use HTTPS even without an API key
    #[serde(default)]
    pub use_https: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Follow HTTP redirects
    #[serde(default = "default_true")]
    pub follow_redirects: bool,

    /// Send the legacy `sensor=false` parameter
    #[serde(default = "default_true")]
    pub legacy_sensor_param: bool,

    /// Preferred result language (e.g. "nl", "en")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

fn default_host() -> String {
    "maps.googleapis.com".to_string()
}

fn default_path() -> String {
    "/maps/api/geocode/json".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_true() -> bool {
    true
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            path: default_path(),
            api_key: None,
            use_https: false,
            timeout_secs: default_timeout_secs(),
            follow_redirects: true,
            legacy_sensor_param: true,
            language: None,
        }
    }
}

impl GeocodingConfig {
    /// Create a configuration with an API key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a configuration pointing at a local host (e.g. a mock server)
    #[must_use]
    pub fn for_testing(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Effective URL scheme
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.api_key.is_some() || self.use_https {
            "https"
        } else {
            "http"
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }

        if self.host.contains("://") {
            return Err("host must not include a scheme".to_string());
        }

        if !self.path.starts_with('/') {
            return Err("path must start with '/'".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            return Err("api_key must not be blank".to_string());
        }

        Ok(())
    }
}
