//! REST client for the statistics backend
//!
//! Wraps the backend's `/videohistory` read endpoints with connection
//! pooling, per-second rate limiting, and retry with exponential backoff.
//! Server errors and transport failures are retried; client errors are not.

use crate::filter::StatisticFilter;
use async_trait::async_trait;
use chanstats_common::{ChanStatsError, PublishedVideoRecord, Result, StatRecord};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, error, info, instrument, warn};

/// Configuration for the statistics backend client
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the backend API (e.g., "http://localhost:8000/api/v1")
    pub base_url: String,
    /// Bearer token for authenticated requests
    pub auth_token: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Connection pool max idle connections per host (default: 10)
    pub max_idle_per_host: usize,
    /// Rate limit: requests per second (default: 10)
    pub rate_limit_per_sec: u32,
    /// Maximum number of retry attempts (default: 3)
    pub max_retries: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            auth_token: None,
            timeout_secs: 30,
            max_idle_per_host: 10,
            rate_limit_per_sec: 10,
            max_retries: 3,
        }
    }
}

impl SourceConfig {
    /// Create a new configuration for the given backend URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the bearer token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the rate limit
    pub fn with_rate_limit(mut self, rate_limit_per_sec: u32) -> Self {
        self.rate_limit_per_sec = rate_limit_per_sec;
        self
    }

    /// Set the maximum retry attempts
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Fetch interface the aggregation layer consumes.
///
/// Implementations return raw record arrays; filter construction and record
/// normalization live on either side of this boundary.
#[async_trait]
pub trait StatisticSource: Send + Sync {
    /// Fetch engagement statistics matching the filter
    async fn get_statistics(&self, filter: &StatisticFilter) -> Result<Vec<StatRecord>>;

    /// Fetch engagement statistics narrowed by tag selection
    async fn get_statistics_with_tags(&self, filter: &StatisticFilter)
        -> Result<Vec<StatRecord>>;

    /// Fetch per-day published-video counts matching the filter
    async fn get_published_counts(
        &self,
        filter: &StatisticFilter,
    ) -> Result<Vec<PublishedVideoRecord>>;

    /// Fetch per-day published-video counts narrowed by tag selection
    async fn get_published_counts_with_tags(
        &self,
        filter: &StatisticFilter,
    ) -> Result<Vec<PublishedVideoRecord>>;
}

/// HTTP implementation of [`StatisticSource`]
#[derive(Debug, Clone)]
pub struct RestStatisticSource {
    client: Client,
    config: SourceConfig,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl RestStatisticSource {
    /// Create a new client with the given configuration
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| ChanStatsError::network_with_source("Failed to create HTTP client", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_sec)
                .ok_or_else(|| ChanStatsError::config("Rate limit must be greater than 0"))?,
        );
        let rate_limiter = Arc::new(DefaultDirectRateLimiter::direct(quota));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Create a new client with default settings for the given backend URL
    pub fn with_defaults(base_url: impl Into<String>) -> Result<Self> {
        Self::new(SourceConfig::new(base_url))
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a request with rate limiting and retry, and parse the JSON body
    #[instrument(skip(self, params), fields(path = %path))]
    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.rate_limiter.until_ready().await;

        let url = self.endpoint_url(path);
        debug!(url = %url, params = params.len(), "requesting statistics");

        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(10))
            .take(self.config.max_retries);

        // Client errors (4xx) will not recover and are not retried.
        let response = RetryIf::spawn(
            retry_strategy,
            || async {
                let mut request = self.client.get(&url).query(params);
                if let Some(token) = &self.config.auth_token {
                    request = request.bearer_auth(token);
                }

                match request.send().await {
                    Ok(response) if response.status().is_success() => Ok(response),
                    Ok(response) => {
                        let status = response.status();
                        if status.is_client_error() {
                            error!(status = %status, "backend rejected request");
                        } else {
                            warn!(status = %status, "server error, will retry");
                        }
                        Err(ChanStatsError::api_with_status(
                            format!("backend returned {status}"),
                            status.as_u16(),
                        ))
                    }
                    Err(e) => {
                        warn!("request failed: {e}");
                        Err(ChanStatsError::from(e))
                    }
                }
            },
            ChanStatsError::is_retryable,
        )
        .await?;

        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let text = response.text().await.map_err(|e| {
            ChanStatsError::network_with_source("Failed to read response body", e)
        })?;

        serde_json::from_str(&text).map_err(ChanStatsError::from)
    }
}

#[async_trait]
impl StatisticSource for RestStatisticSource {
    #[instrument(skip(self, filter))]
    async fn get_statistics(&self, filter: &StatisticFilter) -> Result<Vec<StatRecord>> {
        info!("fetching filtered statistics");
        self.get_json("videohistory/filtered_stats_all", &filter.query_params())
            .await
    }

    #[instrument(skip(self, filter))]
    async fn get_statistics_with_tags(
        &self,
        filter: &StatisticFilter,
    ) -> Result<Vec<StatRecord>> {
        info!("fetching tag-filtered statistics");
        self.get_json("videohistory/filtered_stats_art", &filter.query_params())
            .await
    }

    #[instrument(skip(self, filter))]
    async fn get_published_counts(
        &self,
        filter: &StatisticFilter,
    ) -> Result<Vec<PublishedVideoRecord>> {
        info!("fetching published-video counts");
        self.get_json(
            "videohistory/daily_count_all",
            &filter.published_query_params(),
        )
        .await
    }

    #[instrument(skip(self, filter))]
    async fn get_published_counts_with_tags(
        &self,
        filter: &StatisticFilter,
    ) -> Result<Vec<PublishedVideoRecord>> {
        info!("fetching tag-filtered published-video counts");
        self.get_json(
            "videohistory/daily_article_count",
            &filter.published_query_params(),
        )
        .await
    }
}
