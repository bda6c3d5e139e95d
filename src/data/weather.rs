//! OpenWeatherMap current-conditions client
//!
//! Fetches current weather for a city/country pair and enriches it with an
//! air-quality reading fetched from the coordinates the primary response
//! reports. The air-quality request is best-effort: its failure degrades
//! the snapshot's `air_quality` field to `None` instead of failing the
//! whole fetch.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{Location, WeatherSnapshot};

/// Base URL for the OpenWeatherMap API
const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Per-request timeout; expiry surfaces as a failed fetch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed (network error, timeout, or non-success status)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// Client for fetching current conditions from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    locale: String,
}

impl WeatherClient {
    /// Creates a new WeatherClient
    ///
    /// The API key is not validated here; an empty or wrong key surfaces
    /// as a failed request on first use.
    pub fn new(api_key: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            locale: locale.into(),
        }
    }

    /// Fetch current conditions for the given location
    ///
    /// Issues the primary current-conditions request, then an air-quality
    /// request against the coordinates from the primary response. Only the
    /// primary request can fail the fetch.
    ///
    /// # Returns
    /// * `Ok(WeatherSnapshot)` - Normalized conditions; `air_quality` is
    ///   `None` if the secondary request failed
    /// * `Err(WeatherError)` - If the primary request or parsing fails
    pub async fn fetch_weather(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!(
            "{}/weather?q={},{}&appid={}&units=metric&lang={}",
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
        let api_response: CurrentConditionsResponse = serde_json::from_str(&text)?;

        let air_quality = self
            .fetch_air_quality(api_response.coord.lat, api_response.coord.lon)
            .await
            .ok();

        parse_current_conditions(api_response, air_quality)
    }

    /// Fetch the air quality index (1-5) for the given coordinates
    async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Result<u8, WeatherError> {
        let url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            OPENWEATHER_BASE_URL, lat, lon, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let api_response: AirPollutionResponse = serde_json::from_str(&text)?;

        api_response
            .list
            .into_iter()
            .next()
            .map(|entry| entry.main.aqi)
            .ok_or_else(|| WeatherError::MissingField("list".to_string()))
    }
}

/// Build the condition icon URL from the provider's icon code
///
/// The code is provider-trusted and templated without validation.
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", code)
}

/// Normalize the raw API response into a WeatherSnapshot
fn parse_current_conditions(
    response: CurrentConditionsResponse,
    air_quality: Option<u8>,
) -> Result<WeatherSnapshot, WeatherError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MissingField("weather".to_string()))?;

    // A missing rain field means "no precipitation data, assume none"
    let rain_chance = response.rain.and_then(|r| r.one_hour).unwrap_or(0.0);

    Ok(WeatherSnapshot {
        temp: response.main.temp,
        feels_like: response.main.feels_like,
        temp_min: response.main.temp_min,
        temp_max: response.main.temp_max,
        humidity: response.main.humidity,
        pressure: response.main.pressure,
        wind_speed: response.wind.speed,
        description: condition.description,
        icon_url: icon_url(&condition.icon),
        rain_chance,
        air_quality,
        fetched_at: Utc::now(),
    })
}

/// OpenWeatherMap `/weather` response structure
#[derive(Debug, Deserialize)]
struct CurrentConditionsResponse {
    main: MainReadings,
    wind: Wind,
    weather: Vec<ConditionEntry>,
    rain: Option<Rain>,
    coord: Coord,
}

/// Temperature, humidity, and pressure block
#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: f64,
}

/// Wind block
#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

/// One entry of the `weather` array
#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
    icon: String,
}

/// Optional precipitation block
#[derive(Debug, Deserialize)]
struct Rain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// Coordinates reported by the primary response, used for the air-quality
/// sub-fetch
#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

/// OpenWeatherMap `/air_pollution` response structure
#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    list: Vec<AirQualityEntry>,
}

/// One entry of the air pollution `list` array
#[derive(Debug, Deserialize)]
struct AirQualityEntry {
    main: AirQualityMain,
}

/// Air quality index block
#[derive(Debug, Deserialize)]
struct AirQualityMain {
    aqi: u8,
}
