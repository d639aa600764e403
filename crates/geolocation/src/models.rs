//! Geocoding data models
//!
//! Typed results ([`Coordinates`], [`Address`], [`AddressComponent`]) and the
//! wire representation of the Google Maps Geocoding API response.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Google type tag for the street name component
pub const TYPE_ROUTE: &str = "route";
/// Google type tag for the house number component
pub const TYPE_STREET_NUMBER: &str = "street_number";
/// Google type tag for the city component
pub const TYPE_LOCALITY: &str = "locality";
/// Google type tag for the postal code component
pub const TYPE_POSTAL_CODE: &str = "postal_code";
/// Google type tag for the country component
pub const TYPE_COUNTRY: &str = "country";

/// A latitude/longitude pair resolved by a forward lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub(crate) const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in degrees, as reported by the provider
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, as reported by the provider
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<&Location> for Coordinates {
    fn from(location: &Location) -> Self {
        Self::new(location.lat, location.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// One structured fragment of an address, e.g. the locality or postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressComponent {
    /// Full name, e.g. "Belgium"
    pub long_name: String,
    /// Abbreviated name, e.g. "BE"
    pub short_name: String,
    /// Semantic type tags, e.g. `country`, `political`
    pub types: BTreeSet<String>,
}

impl AddressComponent {
    /// Returns true if the component carries the given type tag
    #[must_use]
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.contains(kind)
    }
}

impl From<RawAddressComponent> for AddressComponent {
    fn from(raw: RawAddressComponent) -> Self {
        Self {
            long_name: raw.long_name,
            short_name: raw.short_name,
            types: raw.types.into_iter().collect(),
        }
    }
}

/// A candidate address resolved by a reverse lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    label: Option<String>,
    components: Vec<AddressComponent>,
}

impl Address {
    /// Formatted one-line address, if the provider sent one
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// All components in provider order
    #[must_use]
    pub fn components(&self) -> &[AddressComponent] {
        &self.components
    }

    /// First component tagged with `kind`
    #[must_use]
    pub fn component(&self, kind: &str) -> Option<&AddressComponent> {
        self.components.iter().find(|c| c.has_type(kind))
    }

    /// Street name (short form)
    #[must_use]
    pub fn street(&self) -> Option<&str> {
        self.short_name_of(TYPE_ROUTE)
    }

    /// House number
    #[must_use]
    pub fn street_number(&self) -> Option<&str> {
        self.short_name_of(TYPE_STREET_NUMBER)
    }

    /// City (long form)
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.component(TYPE_LOCALITY).map(|c| c.long_name.as_str())
    }

    /// Postal code
    #[must_use]
    pub fn zip(&self) -> Option<&str> {
        self.short_name_of(TYPE_POSTAL_CODE)
    }

    /// Country code, e.g. "BE"
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.short_name_of(TYPE_COUNTRY)
    }

    /// Country name, e.g. "Belgium"
    #[must_use]
    pub fn country_label(&self) -> Option<&str> {
        self.component(TYPE_COUNTRY).map(|c| c.long_name.as_str())
    }

    fn short_name_of(&self, kind: &str) -> Option<&str> {
        self.component(kind).map(|c| c.short_name.as_str())
    }
}

impl From<GeocodeResult> for Address {
    fn from(raw: GeocodeResult) -> Self {
        Self {
            label: raw.formatted_address,
            components: raw
                .address_components
                .into_iter()
                .map(AddressComponent::from)
                .collect(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}"),
            None => {
                let names: Vec<&str> = self
                    .components
                    .iter()
                    .map(|c| c.long_name.as_str())
                    .collect();
                write!(f, "{}", names.join(", "))
            },
        }
    }
}

/// Raw geocoding API response envelope
///
/// Results stay undecoded until the provider status has been checked, so an
/// error payload is never reported as a schema mismatch.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub results: Vec<serde_json::Value>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

/// One element of the provider's `results` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Formatted one-line address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    /// Structured address fragments
    pub address_components: Vec<RawAddressComponent>,
    /// Position of the result
    pub geometry: Geometry,
}

/// Address component as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAddressComponent {
    /// Full name
    pub long_name: String,
    /// Abbreviated name
    pub short_name: String,
    /// Type tags in provider order
    pub types: Vec<String>,
}

/// Geometry block of a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Representative point
    pub location: Location,
}

/// Latitude/longitude pair on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}
