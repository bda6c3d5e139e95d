//! Command-line interface parsing for citydash
//!
//! Handles CLI arguments using clap, including the optional initial
//! location and the switch between strict (name lookup) and loose
//! (verbatim code) country handling.

use clap::Parser;
use thiserror::Error;

use crate::location::parse_input;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The --location value did not contain both a city and a country
    #[error("Invalid location: '{0}'. Expected \"City, Country\"")]
    InvalidLocation(String),
}

/// citydash - city weather, forecast, and top news in your terminal
#[derive(Parser, Debug)]
#[command(name = "citydash")]
#[command(about = "City weather, forecast, and top local news dashboard")]
#[command(version)]
pub struct Cli {
    /// Initial location to load, as "City, Country"
    ///
    /// Examples:
    ///   citydash --location "Munich, Germany"
    ///   citydash --location "New York, us" --raw-country-code
    #[arg(long, value_name = "CITY,COUNTRY")]
    pub location: Option<String>,

    /// Locale passed through to the weather and news providers
    #[arg(long, default_value = "en", value_name = "LANG")]
    pub locale: String,

    /// Use the country token verbatim as the country code instead of
    /// resolving country names through the lookup provider
    #[arg(long)]
    pub raw_country_code: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Search to run on startup instead of the default location
    pub initial_search: Option<String>,
    /// Provider locale
    pub locale: String,
    /// Whether country names are resolved to ISO codes
    pub resolve_country_names: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// A `--location` value is shape-checked locally here (city and
    /// country tokens present); the country lookup itself happens later,
    /// through the resolver.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if let Some(raw) = &cli.location {
            parse_input(raw).map_err(|_| CliError::InvalidLocation(raw.clone()))?;
        }

        Ok(StartupConfig {
            initial_search: cli.location.clone(),
            locale: cli.locale.clone(),
            resolve_country_names: !cli.raw_country_code,
        })
    }
}
