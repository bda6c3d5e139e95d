//! Runtime configuration for citydash
//!
//! Provider API keys come from the process environment at startup. A
//! missing key is deliberately not validated here: it is stored empty and
//! surfaces as a failed fetch on the first request that needs it.

use std::env;

use crate::cli::StartupConfig;

/// Environment variable holding the OpenWeatherMap API key
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Environment variable holding the TheNewsAPI token
pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key (may be empty)
    pub weather_api_key: String,
    /// TheNewsAPI token (may be empty)
    pub news_api_key: String,
    /// Locale string passed through to the providers
    pub locale: String,
    /// Whether country names are resolved to ISO codes before fetching
    pub resolve_country_names: bool,
}

impl Config {
    /// Builds the runtime configuration from the environment and the
    /// parsed CLI options
    pub fn from_env(startup: &StartupConfig) -> Self {
        Self::from_vars(
            env::var(WEATHER_API_KEY_VAR).ok(),
            env::var(NEWS_API_KEY_VAR).ok(),
            startup,
        )
    }

    /// Builds the configuration from already-read key values
    fn from_vars(
        weather_api_key: Option<String>,
        news_api_key: Option<String>,
        startup: &StartupConfig,
    ) -> Self {
        Self {
            weather_api_key: weather_api_key.unwrap_or_default(),
            news_api_key: news_api_key.unwrap_or_default(),
            locale: startup.locale.clone(),
            resolve_country_names: startup.resolve_country_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn startup() -> StartupConfig {
        StartupConfig {
            initial_search: None,
            locale: "en".to_string(),
            resolve_country_names: true,
        }
    }

    #[test]
    fn test_missing_keys_are_stored_empty() {
        // Absence of a key is not an error at startup
        let config = Config::from_vars(None, None, &startup());

        assert!(config.weather_api_key.is_empty());
        assert!(config.news_api_key.is_empty());
        assert_eq!(config.locale, "en");
        assert!(config.resolve_country_names);
    }

    #[test]
    fn test_present_keys_are_kept() {
        let config = Config::from_vars(
            Some("weather-key".to_string()),
            Some("news-key".to_string()),
            &startup(),
        );

        assert_eq!(config.weather_api_key, "weather-key");
        assert_eq!(config.news_api_key, "news-key");
    }
}
