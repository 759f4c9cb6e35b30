//! News content API client.
//!
//! Performs a single GET against the search endpoint, unwraps the
//! `response` envelope and maps upstream failures onto the messages shown
//! to users. There is no retry: callers simply issue the next request.

use serde::{Deserialize, Serialize};
#[cfg(feature = "net")]
use std::time::Duration;

use crate::{Error, NewsConfig, Result};
#[cfg(feature = "net")]
use crate::ToolkitConfig;

/// Shown when the upstream reports `status: "error"`.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch news.";
/// Shown when the request itself fails or the body cannot be decoded.
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred while fetching news.";

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Optional search parameters forwarded verbatim to the upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
}

impl NewsQuery {
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            page: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub web_title: String,
    pub web_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ArticleFields>,
}

impl Article {
    pub fn thumbnail(&self) -> Option<&str> {
        self.fields.as_ref()?.thumbnail.as_deref()
    }

    pub fn trail_text(&self) -> Option<&str> {
        self.fields.as_ref()?.trail_text.as_deref()
    }

    pub fn byline_or_default(&self) -> &str {
        self.fields
            .as_ref()
            .and_then(|f| f.byline.as_deref())
            .filter(|b| !b.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// The `response` object of a search, with paging metadata when present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeed {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default)]
    pub results: Vec<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: NewsFeed,
}

/// Build the upstream search URL for a query.
pub fn search_url(config: &NewsConfig, query: &NewsQuery) -> Result<String> {
    let key = config
        .api_key
        .as_deref()
        .ok_or_else(|| Error::Config("GUARDIAN_API_KEY is not set".into()))?;
    let mut url = url::Url::parse(&config.endpoint)
        .map_err(|e| Error::Config(format!("Invalid news endpoint {}: {}", config.endpoint, e)))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("api-key", key);
        pairs.append_pair("show-fields", &config.show_fields);
        if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            pairs.append_pair("q", q);
        }
        if let Some(page) = query.page {
            pairs.append_pair("page", &page.to_string());
        }
    }
    Ok(url.into())
}

/// Unwrap the envelope and turn an upstream error status into [`Error::Api`].
pub fn parse_feed(body: &str) -> Result<NewsFeed> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| {
        log::warn!("news body did not decode: {}", e);
        Error::Network(REQUEST_FAILED_MESSAGE.into())
    })?;
    if envelope.response.status == "error" {
        log::warn!(
            "news upstream reported an error: {}",
            envelope.response.message.as_deref().unwrap_or("<no message>")
        );
        return Err(Error::Api(FETCH_FAILED_MESSAGE.into()));
    }
    Ok(envelope.response)
}

/// Blocking client for the news search endpoint
#[cfg(feature = "net")]
pub struct NewsClient {
    client: reqwest::blocking::Client,
    config: NewsConfig,
}

#[cfg(feature = "net")]
impl NewsClient {
    pub fn new(config: &ToolkitConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config: config.news.clone(),
        })
    }

    pub fn fetch(&self, query: &NewsQuery) -> Result<NewsFeed> {
        let url = search_url(&self.config, query)?;
        log::debug!("fetching news q={:?} page={:?}", query.q, query.page);

        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.text())
            .map_err(|e| {
                log::warn!("news request failed: {}", e);
                Error::Network(REQUEST_FAILED_MESSAGE.into())
            })?;

        parse_feed(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg_with_key() -> NewsConfig {
        NewsConfig {
            api_key: Some("k3y".into()),
            ..Default::default()
        }
    }

    #[test]
    fn search_url_forwards_parameters() {
        let url = search_url(
            &cfg_with_key(),
            &NewsQuery {
                q: Some("rust lang".into()),
                page: Some(2),
            },
        )
        .unwrap();
        assert!(url.starts_with("https://content.guardianapis.com/search?"));
        assert!(url.contains("api-key=k3y"));
        assert!(url.contains("show-fields=thumbnail%2CtrailText%2Cbyline"));
        assert!(url.contains("q=rust+lang"));
        assert!(url.contains("page=2"));
    }

    #[test]
    fn blank_query_is_dropped() {
        let url = search_url(&cfg_with_key(), &NewsQuery::search("   ")).unwrap();
        assert!(!url.contains("q="));
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = search_url(&NewsConfig::default(), &NewsQuery::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn parse_feed_reads_results() {
        let body = r#"{"response":{"status":"ok","total":1,"currentPage":1,"pages":1,
            "results":[{"id":"a/1","webTitle":"Title","webUrl":"https://x/1",
            "fields":{"thumbnail":"https://img/1.jpg","trailText":"Trail"}}]}}"#;
        let feed = parse_feed(body).unwrap();
        assert_eq!(feed.results.len(), 1);
        let a = &feed.results[0];
        assert_eq!(a.web_title, "Title");
        assert_eq!(a.thumbnail(), Some("https://img/1.jpg"));
        assert_eq!(a.trail_text(), Some("Trail"));
        assert_eq!(a.byline_or_default(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn missing_results_means_empty_list() {
        let feed = parse_feed(r#"{"response":{"status":"ok"}}"#).unwrap();
        assert!(feed.results.is_empty());
    }

    #[test]
    fn error_status_maps_to_api_error() {
        let err = parse_feed(r#"{"response":{"status":"error","message":"bad key"}}"#).unwrap_err();
        assert!(matches!(err, Error::Api(ref m) if m == FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn garbage_body_maps_to_network_error() {
        let err = parse_feed("<html>").unwrap_err();
        assert!(matches!(err, Error::Network(ref m) if m == REQUEST_FAILED_MESSAGE));
    }
}
