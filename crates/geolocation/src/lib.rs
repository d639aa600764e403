//! Geocoding via the Google Maps Geocoding API
//!
//! Translates postal addresses into latitude/longitude pairs (forward
//! geocoding) and coordinates into candidate addresses (reverse geocoding).
//!
//! # Architecture
//!
//! [`GeocodingClient`] defines the three lookups and is implemented by
//! [`GoogleGeocodingClient`]. The client maps provider results into
//! [`Coordinates`] and [`Address`] values; the HTTP exchange itself sits
//! behind the [`Transport`] trait, implemented by [`HttpTransport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use geolocation::{AddressQuery, GeocodingClient, GeocodingConfig, GoogleGeocodingClient};
//!
//! let client = GoogleGeocodingClient::new(&GeocodingConfig::with_api_key("my-key"))?;
//!
//! let query = AddressQuery::new()
//!     .with_street("Koningin Maria Hendrikaplein")
//!     .with_street_number("1")
//!     .with_city("Gent")
//!     .with_country("belgium");
//! let coordinates = client.get_coordinates(&query).await?;
//!
//! let address = client.get_address(51.036_393_5, 3.712_100_8).await?;
//! println!("{}", address.label().unwrap_or_default());
//! ```

mod client;
mod config;
mod error;
mod models;
mod query;
mod transport;

pub use client::{GeocodingClient, GoogleGeocodingClient};
pub use config::GeocodingConfig;
pub use error::GeolocationError;
pub use models::{
    Address, AddressComponent, Coordinates, GeocodeResult, Geometry, Location,
    RawAddressComponent, TYPE_COUNTRY, TYPE_LOCALITY, TYPE_POSTAL_CODE, TYPE_ROUTE,
    TYPE_STREET_NUMBER,
};
pub use query::{AddressQuery, QueryParams};
pub use transport::{HttpTransport, Transport};
