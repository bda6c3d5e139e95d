//! Core data models for citydash
//!
//! This module contains the data types shared across the application:
//! the canonical location, the normalized weather/forecast/news records,
//! and the provider clients that produce them.

pub mod forecast;
pub mod news;
pub mod weather;

pub use forecast::{ForecastClient, ForecastError, FORECAST_POINTS};
pub use news::{NewsClient, NewsError};
pub use weather::{WeatherClient, WeatherError};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved location used as the aggregation key
///
/// Created from parsed user input (optionally resolved through the
/// country-name lookup) and replaced wholesale on each successful search;
/// it is never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// City name as entered by the user
    pub city: String,
    /// Lower-case ISO 3166-1 alpha-2 country code (or the raw country
    /// token in the passthrough variant)
    pub country_code: String,
}

impl Location {
    pub fn new(city: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country_code: country_code.into(),
        }
    }
}

/// Current weather conditions for one completed fetch cycle
///
/// Immutable once constructed. All primary fields are always present if
/// the snapshot exists at all; only `air_quality` is optional because its
/// sub-fetch may fail independently of the primary request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current temperature in Celsius
    pub temp: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Human-readable condition description, provider-localized
    pub description: String,
    /// Fully templated condition icon URL
    pub icon_url: String,
    /// Rain volume for the last hour in mm; 0 when the provider omits it
    pub rain_chance: f64,
    /// Air quality index (1-5), absent when the air-quality sub-fetch failed
    pub air_quality: Option<u8>,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

/// One entry of the short-range forecast strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast timestamp, in provider order
    pub timestamp: NaiveDateTime,
    /// Forecast temperature in Celsius
    pub temp: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Human-readable condition description
    pub description: String,
    /// Fully templated condition icon URL
    pub icon_url: String,
}

/// A single news headline
///
/// `image_url` absent is a valid, expected state: the presentation layer
/// alone decides what placeholder to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Article headline
    pub title: String,
    /// Lead image URL, if the provider supplied one
    pub image_url: Option<String>,
}
