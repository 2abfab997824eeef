use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, Result};
use crate::models::{RateLimitState, RepoSummary, SearchPage};
use crate::types::GitHubSearchResponse;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

const SEARCH_PATH: &str = "/search/repositories";

/// A single search request: one page of results for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Unencoded query, as produced by [`crate::query::build_query`].
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

/// Source of repository search pages.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage>;
}

pub struct GitHubClient {
    client: Client,
    search_endpoint: Url,
}

impl GitHubClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;
        let search_endpoint = Url::parse(&format!(
            "{}{}",
            config.api_base_url.trim_end_matches('/'),
            SEARCH_PATH
        ))?;

        Ok(GitHubClient { client, search_endpoint })
    }

    /// Full search URL, sorted by star count descending.
    pub fn search_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.search_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &request.query)
            .append_pair("sort", "stars")
            .append_pair("order", "desc")
            .append_pair("per_page", &request.per_page.to_string())
            .append_pair("page", &request.page.to_string());
        url
    }
}

#[async_trait]
impl SearchBackend for GitHubClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let url = self.search_url(request);
        debug!(%url, "Searching repositories");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        let rate_limit = rate_limit_state(response.headers());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, rate_limit.as_ref(), body));
        }

        if let Some(limit) = rate_limit.as_ref().filter(|l| l.remaining < 3) {
            warn!(remaining = limit.remaining, reset = %limit.reset_time, "Search rate limit nearly exhausted");
        }

        let body = response.text().await?;
        let page = parse_search_page(&body)?;
        Ok(SearchPage { rate_limit, ..page })
    }
}

/// Parses a search response body into a [`SearchPage`].
pub fn parse_search_page(body: &str) -> Result<SearchPage> {
    let data: GitHubSearchResponse = serde_json::from_str(body)?;
    Ok(SearchPage {
        total_results: data.total_count,
        repos: data.items.into_iter().map(RepoSummary::from).collect(),
        rate_limit: None,
    })
}

fn status_error(status: StatusCode, rate_limit: Option<&RateLimitState>, body: String) -> ExplorerError {
    let exhausted = rate_limit.map(|l| l.is_limited).unwrap_or(false);
    if exhausted && (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS) {
        let reset = rate_limit.map(|l| l.reset_time.to_rfc3339()).unwrap_or_default();
        return ExplorerError::RateLimitExceeded(format!("API rate limit exceeded. Reset at: {}", reset));
    }
    ExplorerError::Http {
        status: status.as_u16(),
        body,
    }
}

/// Reads the `X-RateLimit-*` headers. `None` when the API did not send them.
pub fn rate_limit_state(headers: &HeaderMap) -> Option<RateLimitState> {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    let remaining = header("X-RateLimit-Remaining")?.parse::<u32>().ok()?;
    let limit = header("X-RateLimit-Limit")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(10);
    let reset_time = header("X-RateLimit-Reset")
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .unwrap_or_else(|| Utc::now() + chrono::Duration::minutes(1));

    Some(RateLimitState {
        remaining,
        limit,
        reset_time,
        is_limited: remaining == 0,
    })
}
