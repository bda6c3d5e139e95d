//! OpenWeatherMap forecast client
//!
//! Fetches the multi-point forecast time series for a location and maps
//! the first entries into the fixed-size strip shown on the dashboard.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{ForecastPoint, Location};

/// Base URL for the OpenWeatherMap API
const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Per-request timeout; expiry surfaces as a failed fetch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of forecast entries kept, counted positionally from the start of
/// the provider's series. The look-ahead horizon therefore follows the
/// provider's native granularity.
pub const FORECAST_POINTS: usize = 5;

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed (network error, timeout, or non-success status)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Client for fetching the forecast series from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    api_key: String,
    locale: String,
}

impl ForecastClient {
    /// Creates a new ForecastClient
    pub fn new(api_key: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            locale: locale.into(),
        }
    }

    /// Fetch the forecast strip for the given location
    ///
    /// # Returns
    /// * `Ok(Vec<ForecastPoint>)` - At most [`FORECAST_POINTS`] entries in
    ///   provider order; an empty vec is a valid result
    /// * `Err(ForecastError)` - If the request or parsing fails
    pub async fn fetch_forecast(
        &self,
        location: &Location,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        let url = format!(
            "{}/forecast?q={},{}&appid={}&units=metric&lang={}",
            OPENWEATHER_BASE_URL, location.city, location.country_code, self.api_key, self.locale
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let api_response: ForecastResponse = serde_json::from_str(&text)?;

        parse_forecast(api_response)
    }
}

/// Map the raw series into the truncated forecast strip
///
/// Truncation is purely positional (first [`FORECAST_POINTS`] entries as
/// returned); no bucketing or re-sorting across entries is performed, even
/// when several points share a calendar day.
fn parse_forecast(response: ForecastResponse) -> Result<Vec<ForecastPoint>, ForecastError> {
    let mut points = Vec::with_capacity(FORECAST_POINTS);

    for entry in response.list.into_iter().take(FORECAST_POINTS) {
        let condition = entry
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ForecastError::MissingField("weather".to_string()))?;

        points.push(ForecastPoint {
            timestamp: parse_forecast_time(&entry.dt_txt)?,
            temp: entry.main.temp,
            temp_min: entry.main.temp_min,
            temp_max: entry.main.temp_max,
            description: condition.description,
            icon_url: format!("https://openweathermap.org/img/wn/{}.png", condition.icon),
        });
    }

    Ok(points)
}

/// Parse a forecast timestamp (e.g., "2024-07-15 12:00:00") to NaiveDateTime
fn parse_forecast_time(time_str: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(time_str, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| ForecastError::InvalidTimeFormat(time_str.to_string()))
}

/// OpenWeatherMap `/forecast` response structure
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

/// One entry of the forecast series
#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: ForecastReadings,
    weather: Vec<ForecastCondition>,
}

/// Temperature block of a forecast entry
#[derive(Debug, Deserialize)]
struct ForecastReadings {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

/// Condition block of a forecast entry
#[derive(Debug, Deserialize)]
struct ForecastCondition {
    description: String,
    icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a forecast response body with `n` three-hourly entries
    fn response_with_entries(n: usize) -> String {
        let entries: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{
                        "dt": {dt},
                        "dt_txt": "2024-07-15 {hour:02}:00:00",
                        "main": {{"temp": {temp}.0, "temp_min": {tmin}.0, "temp_max": {tmax}.0, "pressure": 1012, "humidity": 60}},
                        "weather": [{{"id": 800, "main": "Clear", "description": "entry {i}", "icon": "01d"}}]
                    }}"#,
                    dt = 1721000000 + i * 10800,
                    hour = (i * 3) % 24,
                    temp = 15 + i,
                    tmin = 13 + i,
                    tmax = 17 + i,
                    i = i
                )
            })
            .collect();
        format!(r#"{{"cod": "200", "cnt": {}, "list": [{}]}}"#, n, entries.join(","))
    }

    #[test]
    fn test_truncates_to_first_five_in_order() {
        let body = response_with_entries(12);
        let response: ForecastResponse =
            serde_json::from_str(&body).expect("Failed to parse forecast response");

        let points = parse_forecast(response).expect("Failed to map forecast");

        assert_eq!(points.len(), FORECAST_POINTS);
        // Positional truncation keeps the first entries in provider order
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.description, format!("entry {}", i));
            assert!((point.temp - (15 + i) as f64).abs() < 0.01);
        }
    }

    #[test]
    fn test_shorter_series_kept_whole() {
        let body = response_with_entries(3);
        let response: ForecastResponse =
            serde_json::from_str(&body).expect("Failed to parse forecast response");

        let points = parse_forecast(response).expect("Failed to map forecast");
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_empty_series_is_valid() {
        let body = r#"{"cod": "200", "cnt": 0, "list": []}"#;
        let response: ForecastResponse =
            serde_json::from_str(body).expect("Failed to parse forecast response");

        // An empty series is a successful result, distinct from a fetch failure
        let points = parse_forecast(response).expect("Failed to map forecast");
        assert!(points.is_empty());
    }

    #[test]
    fn test_entry_fields_mapped_one_to_one() {
        let body = response_with_entries(1);
        let response: ForecastResponse =
            serde_json::from_str(&body).expect("Failed to parse forecast response");

        let points = parse_forecast(response).expect("Failed to map forecast");
        let point = &points[0];

        assert_eq!(
            point.timestamp,
            NaiveDateTime::parse_from_str("2024-07-15 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
        );
        assert!((point.temp - 15.0).abs() < 0.01);
        assert!((point.temp_min - 13.0).abs() < 0.01);
        assert!((point.temp_max - 17.0).abs() < 0.01);
        assert_eq!(point.icon_url, "https://openweathermap.org/img/wn/01d.png");
    }

    #[test]
    fn test_parse_forecast_time_invalid() {
        // ISO T separator is not the provider's format
        assert!(parse_forecast_time("2024-07-15T12:00:00").is_err());
        assert!(parse_forecast_time("not a time").is_err());
    }

    #[test]
    fn test_entry_without_condition_is_missing_field() {
        let body = r#"{
            "cod": "200",
            "cnt": 1,
            "list": [{
                "dt_txt": "2024-07-15 12:00:00",
                "main": {"temp": 20.0, "temp_min": 18.0, "temp_max": 22.0},
                "weather": []
            }]
        }"#;
        let response: ForecastResponse =
            serde_json::from_str(body).expect("Failed to parse forecast response");

        match parse_forecast(response) {
            Err(ForecastError::MissingField(field)) => assert_eq!(field, "weather"),
            _ => panic!("Expected MissingField error"),
        }
    }
}
