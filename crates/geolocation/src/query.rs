//! Request parameters
//!
//! [`AddressQuery`] holds the optional address fields of a forward lookup
//! and knows how to flatten them into the provider's free-text `address`
//! parameter. [`QueryParams`] is the ordered key/value list a single
//! request URL is built from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Address fields for a forward geocoding lookup
///
/// All fields are optional; empty ones are skipped when the query text is
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    /// Street name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// House number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    /// City or locality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Country name or code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl AddressQuery {
    /// Create an empty query
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the street name
    #[must_use]
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Set the house number
    #[must_use]
    pub fn with_street_number(mut self, street_number: impl Into<String>) -> Self {
        self.street_number = Some(street_number.into());
        self
    }

    /// Set the city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the postal code
    #[must_use]
    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }

    /// Set the country
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Non-empty fields in lookup order: street, number, city, zip, country
    fn parts(&self) -> impl Iterator<Item = &str> {
        [
            &self.street,
            &self.street_number,
            &self.city,
            &self.zip,
            &self.country,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .filter(|part| !part.trim().is_empty())
    }

    /// Returns true if no field carries any text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts().next().is_none()
    }

    /// Free-text value for the provider's `address` parameter
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.parts().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for AddressQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts().collect::<Vec<_>>().join(", "))
    }
}

/// Ordered query parameters for a single geocoding request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping insertion order
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter in place
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Look up the first value for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Format a coordinate pair as the provider's `latlng` value
#[must_use]
pub fn format_latlng(latitude: f64, longitude: f64) -> String {
    format!("{latitude},{longitude}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_query_string() {
        let query = AddressQuery::new()
            .with_street("Koningin Maria Hendrikaplein")
            .with_street_number("1")
            .with_city("Gent")
            .with_zip("9000")
            .with_country("belgium");
        assert_eq!(
            query.to_query_string(),
            "Koningin Maria Hendrikaplein 1 Gent 9000 belgium"
        );
    }

    #[test]
    fn test_query_string_skips_missing_fields() {
        let query = AddressQuery::new().with_city("Gent").with_country("belgium");
        assert_eq!(query.to_query_string(), "Gent belgium");
    }

    #[test]
    fn test_query_string_skips_blank_fields() {
        let query = AddressQuery::new()
            .with_street("")
            .with_street_number("  ")
            .with_zip("9000");
        assert_eq!(query.to_query_string(), "9000");
    }

    #[test]
    fn test_zero_is_not_treated_as_empty() {
        let query = AddressQuery::new().with_street("Main Street").with_street_number("0");
        assert_eq!(query.to_query_string(), "Main Street 0");
    }

    #[test]
    fn test_empty_query() {
        assert!(AddressQuery::new().is_empty());
        assert!(AddressQuery::new().with_city(" ").is_empty());
        assert!(!AddressQuery::new().with_zip("9000").is_empty());
        assert_eq!(AddressQuery::new().to_query_string(), "");
    }

    #[test]
    fn test_display_joins_with_commas() {
        let query = AddressQuery::new().with_street("Veldstraat").with_city("Gent");
        assert_eq!(query.to_string(), "Veldstraat, Gent");
    }

    #[test]
    fn test_query_params_order() {
        let params = QueryParams::new()
            .with("address", "Gent")
            .with("sensor", "false");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("address", "Gent"), ("sensor", "false")]);
        assert_eq!(params.get("sensor"), Some("false"));
        assert_eq!(params.get("key"), None);
        assert_eq!(params.len(), 2);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_format_latlng() {
        assert_eq!(format_latlng(51.036_393_5, 3.712_100_8), "51.0363935,3.7121008");
        assert_eq!(format_latlng(-33.5, 0.0), "-33.5,0");
    }

    #[test]
    fn test_address_query_deserialization() {
        let query: AddressQuery = serde_json::from_str(r#"{"city": "Gent"}"#).unwrap();
        assert_eq!(query, AddressQuery::new().with_city("Gent"));
    }
}
