//! Geocoding client
//!
//! Forward lookups (address to coordinates) and reverse lookups
//! (coordinates to addresses) on top of a [`Transport`].

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::GeolocationError;
use crate::models::{Address, Coordinates};
use crate::query::{AddressQuery, QueryParams, format_latlng};
use crate::transport::{HttpTransport, Transport};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve an address to coordinates
    async fn get_coordinates(&self, query: &AddressQuery) -> Result<Coordinates, GeolocationError>;

    /// Resolve coordinates to every candidate address, in provider order
    async fn get_addresses(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Address>, GeolocationError>;

    /// Resolve coordinates to the best matching address
    async fn get_address(&self, latitude: f64, longitude: f64) -> Result<Address, GeolocationError> {
        self.get_addresses(latitude, longitude)
            .await?
            .into_iter()
            .next()
            .ok_or(GeolocationError::NoAddressFound {
                latitude,
                longitude,
            })
    }
}

/// Google Maps geocoding client
#[derive(Debug)]
pub struct GoogleGeocodingClient<T = HttpTransport> {
    transport: T,
    legacy_sensor_param: bool,
}

impl GoogleGeocodingClient {
    /// Create a client that talks HTTP to the configured host
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeolocationError> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
            legacy_sensor_param: config.legacy_sensor_param,
        })
    }
}

impl<T: Transport> GoogleGeocodingClient<T> {
    /// Create a client on top of an existing transport
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self {
            transport,
            legacy_sensor_param: true,
        }
    }

    /// Stop sending the legacy `sensor=false` parameter
    #[must_use]
    pub fn without_sensor_param(mut self) -> Self {
        self.legacy_sensor_param = false;
        self
    }

    /// The underlying transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn with_sensor(&self, mut params: QueryParams) -> QueryParams {
        if self.legacy_sensor_param {
            params.push("sensor", "false");
        }
        params
    }

    fn forward_params(&self, query: &AddressQuery) -> QueryParams {
        self.with_sensor(QueryParams::new().with("address", query.to_query_string()))
    }

    fn reverse_params(&self, latitude: f64, longitude: f64) -> QueryParams {
        self.with_sensor(QueryParams::new().with("latlng", format_latlng(latitude, longitude)))
    }
}

#[async_trait]
impl<T: Transport> GeocodingClient for GoogleGeocodingClient<T> {
    #[instrument(skip(self), fields(address = %query))]
    async fn get_coordinates(
        &self,
        query: &AddressQuery,
    ) -> Result<Coordinates, GeolocationError> {
        if query.is_empty() {
            warn!("Empty address query");
            return Err(GeolocationError::NoCoordinatesFound {
                query: query.clone(),
            });
        }

        let results = self.transport.call(&self.forward_params(query)).await?;

        let Some(first) = results.first() else {
            warn!("No coordinates found");
            return Err(GeolocationError::NoCoordinatesFound {
                query: query.clone(),
            });
        };

        let coordinates = Coordinates::from(&first.geometry.location);
        debug!(%coordinates, candidates = results.len(), "Geocoded address");
        Ok(coordinates)
    }

    #[instrument(skip(self))]
    async fn get_addresses(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Address>, GeolocationError> {
        let results = self
            .transport
            .call(&self.reverse_params(latitude, longitude))
            .await?;

        if results.is_empty() {
            warn!("No address found");
            return Err(GeolocationError::NoAddressFound {
                latitude,
                longitude,
            });
        }

        let addresses: Vec<Address> = results.into_iter().map(Address::from).collect();
        debug!(count = addresses.len(), "Reverse geocoded coordinates");
        Ok(addresses)
    }
}
