//! TheNewsAPI top-stories client
//!
//! Fetches the top headlines for a country locale. The provider's own
//! account-tier cap (3 articles) bounds the result size; the client does
//! not impose a cap of its own, and it never substitutes a placeholder
//! for a missing article image.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::NewsArticle;

/// Base URL for TheNewsAPI
const NEWS_API_BASE_URL: &str = "https://api.thenewsapi.com/v1";

/// Article count requested per fetch (free-tier maximum)
const NEWS_LIMIT: usize = 3;

/// Per-request timeout; expiry surfaces as a failed fetch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching news
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed (network error, timeout, or non-success status)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for fetching top headlines from TheNewsAPI
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    api_token: String,
}

impl NewsClient {
    /// Creates a new NewsClient
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_token: api_token.into(),
        }
    }

    /// Fetch top headlines for the given locale/country code
    ///
    /// The locale string is passed through to the provider verbatim.
    ///
    /// # Returns
    /// * `Ok(Vec<NewsArticle>)` - Headlines with `image_url` left absent
    ///   where the provider reported none
    /// * `Err(NewsError)` - If the request or parsing fails
    pub async fn fetch_news(&self, locale: &str) -> Result<Vec<NewsArticle>, NewsError> {
        let url = format!(
            "{}/news/top?api_token={}&locale={}&limit={}",
            NEWS_API_BASE_URL, self.api_token, locale, NEWS_LIMIT
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let api_response: NewsResponse = serde_json::from_str(&text)?;

        Ok(api_response
            .data
            .into_iter()
            .map(|article| NewsArticle {
                title: article.title,
                image_url: article.image_url,
            })
            .collect())
    }
}

/// TheNewsAPI `/news/top` response structure
#[derive(Debug, Deserialize)]
struct NewsResponse {
    data: Vec<ArticleEntry>,
}

/// One article from the provider
#[derive(Debug, Deserialize)]
struct ArticleEntry {
    title: String,
    /// Nullable at the provider; null maps to None
    image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample response with a null image_url on the second article
    const VALID_RESPONSE: &str = r#"{
        "meta": {"found": 12034, "returned": 3, "limit": 3, "page": 1},
        "data": [
            {
                "uuid": "a1",
                "title": "City council approves transit expansion",
                "image_url": "https://cdn.example.com/transit.jpg",
                "language": "en"
            },
            {
                "uuid": "b2",
                "title": "Storm warning issued for the coast",
                "image_url": null,
                "language": "en"
            },
            {
                "uuid": "c3",
                "title": "Local team advances to finals",
                "image_url": "https://cdn.example.com/finals.jpg",
                "language": "en"
            }
        ]
    }"#;

    #[test]
    fn test_parse_articles() {
        let response: NewsResponse =
            serde_json::from_str(VALID_RESPONSE).expect("Failed to parse news response");

        assert_eq!(response.data.len(), 3);
        assert_eq!(response.data[0].title, "City council approves transit expansion");
        assert_eq!(
            response.data[0].image_url.as_deref(),
            Some("https://cdn.example.com/transit.jpg")
        );
    }

    #[test]
    fn test_null_image_url_is_absent_not_placeholder() {
        let response: NewsResponse =
            serde_json::from_str(VALID_RESPONSE).expect("Failed to parse news response");

        let article = &response.data[1];
        // Null normalizes to None; no placeholder URL is ever produced here
        assert!(article.image_url.is_none());
        assert_eq!(article.title, "Storm warning issued for the coast");
    }

    #[test]
    fn test_missing_image_url_field_is_absent() {
        let body = r#"{"data": [{"title": "Headline only"}]}"#;
        let response: NewsResponse =
            serde_json::from_str(body).expect("Failed to parse news response");

        assert!(response.data[0].image_url.is_none());
    }

    #[test]
    fn test_empty_data_is_valid() {
        let body = r#"{"data": []}"#;
        let response: NewsResponse =
            serde_json::from_str(body).expect("Failed to parse news response");
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let result: Result<NewsResponse, _> = serde_json::from_str("{ not json }");
        assert!(result.is_err());
    }
}
