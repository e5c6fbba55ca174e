use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use std::future::Future;

use crate::config::CONFIG;
use crate::data_models::{FeedResponse, SearchResult};
use crate::error::FetchError;

pub const FEED_PATH: &str = "feeds/photos_public.gne";

/// Anything that can turn a tag query into a batch of photos. The pipeline
/// is generic over this so tests can script outcomes.
pub trait PhotoFetcher: Send + Sync + 'static {
    fn fetch(&self, query: &str)
    -> impl Future<Output = Result<SearchResult, FetchError>> + Send;
}

/// One-shot GET against the public photo feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl FeedClient {
    /// Client for the configured feed host.
    pub fn new() -> Result<Self> {
        Self::with_base_url(&CONFIG.feed_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let endpoint = Url::parse(&base_url)
            .and_then(|base| base.join(FEED_PATH))
            .with_context(|| format!("Invalid feed base url: {base_url}"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify(status: StatusCode) -> Option<FetchError> {
        match status {
            StatusCode::OK => None,
            StatusCode::UNAUTHORIZED => Some(FetchError::Unauthorized),
            StatusCode::NOT_FOUND => Some(FetchError::NotFound),
            other => Some(FetchError::Unexpected(other.as_u16())),
        }
    }
}

impl PhotoFetcher for FeedClient {
    async fn fetch(&self, query: &str) -> Result<SearchResult, FetchError> {
        log::debug!("fetching feed for tags {query:?}");

        let res = self
            .client
            .get(self.endpoint.clone())
            .query(&[("format", "json"), ("nojsoncallback", "1"), ("tags", query)])
            .send()
            .await
            .inspect_err(|e| log::warn!("feed request for {query:?} failed: {e}"))?;

        if let Some(err) = Self::classify(res.status()) {
            log::warn!("feed request for {query:?} returned {}", res.status());
            return Err(err);
        }

        let body = res.text().await?;
        let response: FeedResponse = serde_json::from_str(&body)
            .inspect_err(|e| log::warn!("undecodable feed body for {query:?}: {e}"))?;
        let result = SearchResult::from(response);

        log::info!("feed returned {} items for {query:?}", result.len());
        Ok(result)
    }
}
