//! Geolocation error types

use thiserror::Error;

use crate::query::AddressQuery;

/// Errors that can occur during geocoding operations
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// No HTTP client could be set up in this runtime
    #[error("HTTP transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Network-level failure (DNS, timeout, connection reset, HTTP status)
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The provider signalled that the request quota is used up
    #[error(
        "You have exceeded your request quota for this API; \
         register for a key at https://console.developers.google.com/apis/credentials"
    )]
    ProviderQuotaExceeded,

    /// Any other error payload returned by the provider
    #[error("Provider error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    ProviderError {
        /// Provider status code, e.g. `REQUEST_DENIED`
        status: String,
        /// Human-readable message, if the provider sent one
        message: Option<String>,
    },

    /// Response body did not match the expected schema
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Forward geocoding returned no results
    #[error("No coordinates found for address \"{query}\"")]
    NoCoordinatesFound {
        /// The address fields that were looked up
        query: AddressQuery,
    },

    /// Reverse geocoding returned no results
    #[error("No address found for coordinates (latitude {latitude}, longitude {longitude})")]
    NoAddressFound {
        /// Requested latitude
        latitude: f64,
        /// Requested longitude
        longitude: f64,
    },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl GeolocationError {
    /// Returns true if the provider rejected the call because of its quota
    #[must_use]
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::ProviderQuotaExceeded)
    }

    /// Returns true if the lookup succeeded but matched nothing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoCoordinatesFound { .. } | Self::NoAddressFound { .. }
        )
    }
}
