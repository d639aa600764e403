//! HTTP transport for the Google Maps Geocoding API
//!
//! Builds the request URL from a [`QueryParams`] list, performs a single GET
//! and decodes the `results` array. Provider-level error payloads are mapped
//! to [`GeolocationError`] here so the result mapper only ever sees data.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode, redirect};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::GeocodingConfig;
use crate::error::GeolocationError;
use crate::models::{GeocodeResponse, GeocodeResult};
use crate::query::QueryParams;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
const STATUS_OVER_QUERY_LIMIT: &str = "OVER_QUERY_LIMIT";
const STATUS_OVER_DAILY_LIMIT: &str = "OVER_DAILY_LIMIT";
const STATUS_UNKNOWN: &str = "UNKNOWN_ERROR";

const USER_AGENT: &str = concat!("geolocation/", env!("CARGO_PKG_VERSION"));

/// A single request/response exchange with the geocoding provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request with the given parameters and return the raw results
    ///
    /// An empty vector means the provider matched nothing.
    async fn call(&self, params: &QueryParams) -> Result<Vec<GeocodeResult>, GeolocationError>;
}

/// reqwest-backed transport
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    config: GeocodingConfig,
}

impl HttpTransport {
    /// Create a new transport
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an invalid configuration and
    /// `TransportUnavailable` if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeolocationError> {
        config
            .validate()
            .map_err(GeolocationError::ConfigurationError)?;

        Ok(Self {
            client: build_client(config, USER_AGENT)?,
            config: config.clone(),
        })
    }

    /// The configuration this transport was built with
    #[must_use]
    pub const fn config(&self) -> &GeocodingConfig {
        &self.config
    }

    /// Build `scheme://host/path?params[&language=..][&key=..]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if host and path do not form a valid URL.
    pub fn request_url(&self, params: &QueryParams) -> Result<Url, GeolocationError> {
        let base = format!(
            "{}://{}{}",
            self.config.scheme(),
            self.config.host,
            self.config.path
        );
        let mut url = Url::parse(&base)
            .map_err(|e| GeolocationError::ConfigurationError(format!("{base}: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.extend_pairs(params.iter());
            if let Some(language) = &self.config.language {
                pairs.append_pair("language", language);
            }
            if let Some(key) = &self.config.api_key {
                pairs.append_pair("key", key);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, params))]
    async fn call(&self, params: &QueryParams) -> Result<Vec<GeocodeResult>, GeolocationError> {
        let url = self.request_url(params)?;
        debug!(url = %redact_key(&url), "Sending geocoding request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeolocationError::TransportError(format!(
                    "request timed out after {} seconds",
                    self.config.timeout_secs
                ))
            } else {
                GeolocationError::TransportError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Geocoding provider returned HTTP 429");
            return Err(GeolocationError::ProviderQuotaExceeded);
        }

        if !status.is_success() {
            return Err(GeolocationError::TransportError(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeolocationError::TransportError(e.to_string()))?;

        let results = parse_response(&body)?;
        debug!(count = results.len(), "Geocoding results received");
        Ok(results)
    }
}

/// Set up the reqwest client; any builder failure means no usable transport
fn build_client(config: &GeocodingConfig, user_agent: &str) -> Result<Client, GeolocationError> {
    let policy = if config.follow_redirects {
        redirect::Policy::default()
    } else {
        redirect::Policy::none()
    };

    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(policy)
        .user_agent(user_agent)
        .build()
        .map_err(|e| GeolocationError::TransportUnavailable(e.to_string()))
}

/// Decode a response body, surfacing provider error payloads first
pub(crate) fn parse_response(body: &str) -> Result<Vec<GeocodeResult>, GeolocationError> {
    let response: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| GeolocationError::ParseError(e.to_string()))?;

    check_status(response.status.as_deref(), response.error_message)?;

    response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_value(raw)
                .map_err(|e| GeolocationError::ParseError(format!("result {index}: {e}")))
        })
        .collect()
}

fn check_status(
    status: Option<&str>,
    error_message: Option<String>,
) -> Result<(), GeolocationError> {
    match status {
        Some(STATUS_OVER_QUERY_LIMIT | STATUS_OVER_DAILY_LIMIT) => {
            warn!(?status, error = ?error_message, "Geocoding quota exceeded");
            Err(GeolocationError::ProviderQuotaExceeded)
        },
        Some(STATUS_OK | STATUS_ZERO_RESULTS) | None if error_message.is_none() => Ok(()),
        _ => {
            let status = status.unwrap_or(STATUS_UNKNOWN).to_string();
            warn!(%status, error = ?error_message, "Geocoding provider returned an error");
            Err(GeolocationError::ProviderError {
                status,
                message: error_message,
            })
        },
    }
}

/// Render a URL for logging with the API key masked
fn redact_key(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
