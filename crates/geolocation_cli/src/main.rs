//! geolocate CLI
//!
//! Command-line front end for forward and reverse geocoding.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use geolocation::{
    Address, AddressQuery, Coordinates, GeocodingClient, GeocodingConfig, GoogleGeocodingClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// geolocate CLI
#[derive(Debug, Parser)]
#[command(name = "geolocate")]
#[command(author, version, about = "Address and coordinate lookups via Google Maps", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Google Maps API key (forces HTTPS)
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", global = true)]
    api_key: Option<String>,

    /// Use HTTPS without an API key
    #[arg(long, global = true)]
    https: bool,

    /// TOML file with client configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up the coordinates of an address
    ///
    /// Example: geolocate coordinates --street "Koningin Maria Hendrikaplein" --number 1 --city Gent
    Coordinates {
        /// Street name
        #[arg(long)]
        street: Option<String>,

        /// House number
        #[arg(long = "number")]
        street_number: Option<String>,

        /// City
        #[arg(long)]
        city: Option<String>,

        /// Postal code
        #[arg(long)]
        zip: Option<String>,

        /// Country
        #[arg(long)]
        country: Option<String>,
    },

    /// Look up the address at a coordinate pair
    ///
    /// Example: geolocate address 51.0363935 3.7121008
    Address {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// List every candidate instead of the best match
        #[arg(long)]
        all: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Load the base configuration and apply command-line overrides
fn load_config(
    path: Option<&Path>,
    api_key: Option<String>,
    https: bool,
) -> anyhow::Result<GeocodingConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<GeocodingConfig>(&raw)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        },
        None => GeocodingConfig::default(),
    };

    if api_key.is_some() {
        config.api_key = api_key;
    }
    if https {
        config.use_https = true;
    }

    Ok(config)
}

fn format_coordinates(coordinates: &Coordinates) -> String {
    format!("Coordinates = {coordinates}")
}

fn format_address(address: &Address) -> String {
    format!("Address = {address}")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref(), cli.api_key, cli.https)?;
    tracing::debug!(
        scheme = config.scheme(),
        host = %config.host,
        keyed = config.api_key.is_some(),
        "Loaded configuration"
    );
    let client = GoogleGeocodingClient::new(&config)?;

    match cli.command {
        Commands::Coordinates {
            street,
            street_number,
            city,
            zip,
            country,
        } => {
            let query = AddressQuery {
                street,
                street_number,
                city,
                zip,
                country,
            };
            if query.is_empty() {
                anyhow::bail!("at least one address field is required");
            }

            let coordinates = client.get_coordinates(&query).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&coordinates)?);
            } else {
                println!("{}", format_coordinates(&coordinates));
            }
        },

        Commands::Address {
            latitude,
            longitude,
            all,
        } => {
            let addresses = if all {
                client.get_addresses(latitude, longitude).await?
            } else {
                vec![client.get_address(latitude, longitude).await?]
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&addresses)?);
            } else {
                for address in &addresses {
                    println!("{}", format_address(address));
                }
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use geolocation::GeocodeResult;

    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn cli_parses_coordinates_command() {
        let cli = parse_args(&[
            "geolocate",
            "coordinates",
            "--street",
            "Koningin Maria Hendrikaplein",
            "--number",
            "1",
            "--city",
            "Gent",
        ])
        .unwrap();

        let Commands::Coordinates {
            street,
            street_number,
            city,
            zip,
            country,
        } = cli.command
        else {
            panic!("Expected Coordinates command");
        };
        assert_eq!(street.as_deref(), Some("Koningin Maria Hendrikaplein"));
        assert_eq!(street_number.as_deref(), Some("1"));
        assert_eq!(city.as_deref(), Some("Gent"));
        assert!(zip.is_none());
        assert!(country.is_none());
    }

    #[test]
    fn cli_parses_address_command() {
        let cli = parse_args(&["geolocate", "address", "51.0363935", "3.7121008"]).unwrap();

        let Commands::Address {
            latitude,
            longitude,
            all,
        } = cli.command
        else {
            panic!("Expected Address command");
        };
        assert!((latitude - 51.036_393_5).abs() < f64::EPSILON);
        assert!((longitude - 3.712_100_8).abs() < f64::EPSILON);
        assert!(!all);
    }

    #[test]
    fn cli_parses_negative_coordinates() {
        let cli = parse_args(&["geolocate", "address", "-33.8688", "-151.2093", "--all"]).unwrap();

        let Commands::Address {
            latitude,
            longitude,
            all,
        } = cli.command
        else {
            panic!("Expected Address command");
        };
        assert!(latitude < 0.0);
        assert!(longitude < 0.0);
        assert!(all);
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = parse_args(&[
            "geolocate",
            "address",
            "1.0",
            "2.0",
            "--https",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert!(cli.https);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_rejects_missing_longitude() {
        assert!(parse_args(&["geolocate", "address", "51.0"]).is_err());
    }

    #[test]
    fn cli_rejects_unknown_command() {
        assert!(parse_args(&["geolocate", "route"]).is_err());
    }

    #[test]
    fn load_config_defaults() {
        let config = load_config(None, None, false).unwrap();
        assert_eq!(config, GeocodingConfig::default());
    }

    #[test]
    fn load_config_overrides() {
        let config = load_config(None, Some("key".to_string()), true).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert!(config.use_https);
        assert_eq!(config.scheme(), "https");
    }

    #[test]
    fn load_config_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"from-file\"").unwrap();
        writeln!(file, "language = \"nl\"").unwrap();
        writeln!(file, "timeout_secs = 3").unwrap();

        let config = load_config(Some(file.path()), None, false).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.language.as_deref(), Some("nl"));
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.host, "maps.googleapis.com");

        let config = load_config(Some(file.path()), Some("from-cli".to_string()), false).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-cli"));
    }

    #[test]
    fn load_config_missing_file() {
        assert!(load_config(Some(Path::new("/nonexistent/geolocate.toml")), None, false).is_err());
    }

    #[test]
    fn format_address_uses_label() {
        let result: GeocodeResult = serde_json::from_str(
            r#"{
                "formatted_address": "9000 Gent, Belgium",
                "address_components": [],
                "geometry": { "location": { "lat": 51.05, "lng": 3.72 } }
            }"#,
        )
        .unwrap();
        let address = Address::from(result);
        assert_eq!(format_address(&address), "Address = 9000 Gent, Belgium");
    }

    #[test]
    fn format_coordinates_output() {
        let result: GeocodeResult = serde_json::from_str(
            r#"{
                "address_components": [],
                "geometry": { "location": { "lat": 51.0372496, "lng": 3.7094975 } }
            }"#,
        )
        .unwrap();
        let coordinates = Coordinates::from(&result.geometry.location);
        assert_eq!(
            format_coordinates(&coordinates),
            "Coordinates = 51.0372496, 3.7094975"
        );
    }
}
