//! Location resolution from free-text input
//!
//! Turns a "City, Country" search string into the canonical [`Location`]
//! used as the aggregation key. Input parsing is local and never touches
//! the network; the optional country-name lookup queries the REST
//! Countries API for the ISO code.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::data::Location;

/// Base URL for the REST Countries name lookup
const COUNTRY_API_BASE_URL: &str = "https://restcountries.com/v3.1/name";

/// Per-request timeout; expiry collapses into CountryNotFound
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while resolving a location
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The input did not contain both a city and a country token
    #[error("Enter a city and a country separated by a comma, e.g. \"Munich, Germany\"")]
    MalformedInput,

    /// The country name could not be resolved to an ISO code
    #[error("Could not find a country code for '{0}'")]
    CountryNotFound(String),
}

/// Split raw input into trimmed (city, country) tokens
///
/// The split happens on the FIRST comma only, so everything after it is
/// taken as the country token whole. Purely local: no network call is made
/// before this validation passes.
pub fn parse_input(raw: &str) -> Result<(String, String), ResolveError> {
    let (city, country) = raw.split_once(',').ok_or(ResolveError::MalformedInput)?;
    let city = city.trim();
    let country = country.trim();

    if city.is_empty() || country.is_empty() {
        return Err(ResolveError::MalformedInput);
    }

    Ok((city.to_string(), country.to_string()))
}

/// Resolves free-text input into a canonical location
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Client,
    /// When true, the country token is resolved through the name lookup;
    /// when false it is used verbatim as the country code, unvalidated.
    resolve_country_names: bool,
}

impl LocationResolver {
    /// Creates a new LocationResolver
    pub fn new(resolve_country_names: bool) -> Self {
        Self {
            client: Client::new(),
            resolve_country_names,
        }
    }

    /// Resolve raw search input into a [`Location`]
    ///
    /// # Returns
    /// * `Ok(Location)` - City and lower-cased country code
    /// * `Err(ResolveError::MalformedInput)` - Fewer than two non-empty
    ///   comma-separated tokens; no network call was made
    /// * `Err(ResolveError::CountryNotFound)` - The lookup returned no
    ///   match, or the lookup call itself failed
    pub async fn resolve(&self, raw: &str) -> Result<Location, ResolveError> {
        let (city, country) = parse_input(raw)?;

        let country_code = if self.resolve_country_names {
            self.lookup_country_code(&country).await?
        } else {
            country
        };

        Ok(Location::new(city, country_code))
    }

    /// Look up a country's ISO 3166-1 alpha-2 code by name
    ///
    /// All failure modes (network error, timeout, non-success status,
    /// malformed body, empty result) collapse to `CountryNotFound`; no
    /// partial code is ever produced.
    async fn lookup_country_code(&self, country_name: &str) -> Result<String, ResolveError> {
        let url = format!("{}/{}", COUNTRY_API_BASE_URL, country_name);
        let not_found = || ResolveError::CountryNotFound(country_name.to_string());

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|_| not_found())?
            .error_for_status()
            .map_err(|_| not_found())?;
        let matches: Vec<CountryEntry> = response.json().await.map_err(|_| not_found())?;

        matches
            .into_iter()
            .next()
            .map(|entry| entry.cca2.to_lowercase())
            .ok_or_else(not_found)
    }
}

/// One country from the REST Countries name lookup
#[derive(Debug, Deserialize)]
struct CountryEntry {
    /// ISO 3166-1 alpha-2 code
    cca2: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_input() {
        let (city, country) = parse_input("Munich, Germany").expect("Failed to parse input");
        assert_eq!(city, "Munich");
        assert_eq!(country, "Germany");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let (city, country) = parse_input("  New York ,   us  ").expect("Failed to parse input");
        assert_eq!(city, "New York");
        assert_eq!(country, "us");
    }

    #[test]
    fn test_parse_splits_on_first_comma_only() {
        // Everything after the first comma is the country token, whole
        let (city, country) = parse_input("Washington, DC, USA").expect("Failed to parse input");
        assert_eq!(city, "Washington");
        assert_eq!(country, "DC, USA");
    }

    #[test]
    fn test_parse_missing_comma_is_malformed() {
        assert!(matches!(parse_input("Munich"), Err(ResolveError::MalformedInput)));
    }

    #[test]
    fn test_parse_empty_tokens_are_malformed() {
        assert!(matches!(parse_input("Munich,"), Err(ResolveError::MalformedInput)));
        assert!(matches!(parse_input(", Germany"), Err(ResolveError::MalformedInput)));
        assert!(matches!(parse_input(" , "), Err(ResolveError::MalformedInput)));
        assert!(matches!(parse_input(""), Err(ResolveError::MalformedInput)));
    }

    #[tokio::test]
    async fn test_resolve_passthrough_uses_country_token_verbatim() {
        // Looser variant: the country token becomes the code unvalidated
        let resolver = LocationResolver::new(false);
        let location = resolver
            .resolve("Munich, de")
            .await
            .expect("Failed to resolve");

        assert_eq!(location.city, "Munich");
        assert_eq!(location.country_code, "de");
    }

    #[tokio::test]
    async fn test_resolve_passthrough_does_not_lowercase() {
        let resolver = LocationResolver::new(false);
        let location = resolver
            .resolve("Munich, DE")
            .await
            .expect("Failed to resolve");
        assert_eq!(location.country_code, "DE");
    }

    #[tokio::test]
    async fn test_resolve_malformed_input_fails_before_any_lookup() {
        // Even with lookup enabled, malformed input must fail locally
        let resolver = LocationResolver::new(true);
        let result = resolver.resolve("nocomma").await;
        assert!(matches!(result, Err(ResolveError::MalformedInput)));
    }

    #[test]
    fn test_country_entry_parse_and_lowercase() {
        let body = r#"[
            {"name": {"common": "Germany"}, "cca2": "DE", "cca3": "DEU"},
            {"name": {"common": "German Democratic Republic"}, "cca2": "DD"}
        ]"#;
        let matches: Vec<CountryEntry> =
            serde_json::from_str(body).expect("Failed to parse country lookup response");

        // First match wins, lower-cased
        let code = matches
            .into_iter()
            .next()
            .map(|entry| entry.cca2.to_lowercase());
        assert_eq!(code.as_deref(), Some("de"));
    }

    #[test]
    fn test_empty_lookup_result_yields_no_code() {
        let matches: Vec<CountryEntry> =
            serde_json::from_str("[]").expect("Failed to parse country lookup response");
        assert!(matches.into_iter().next().is_none());
    }
}
