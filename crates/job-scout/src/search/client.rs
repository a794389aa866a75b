use super::decode::{collect_records, PayloadView};
use super::record::JobRecord;
use crate::config::{ConfigError, UpstreamConfig};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub const DEFAULT_RESULT_LIMIT: usize = 5;
pub const DEFAULT_RECENCY_DAYS: u32 = 5;
pub const DEFAULT_COUNTRY: &str = "US";
pub const REMOTE_LTYPE: &str = "1";

/// Why an upstream search produced no usable records.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("upstream request failed: {0}")]
    Transport(reqwest::Error),
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("upstream payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("upstream reported an error: {0}")]
    Upstream(String),
    #[error("upstream payload has no job results")]
    MissingResults,
}

impl From<reqwest::Error> for SearchError {
    // The request URL carries the API key, so it never reaches logs.
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// Parameters of a single upstream search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: String,
    /// Optional pre-filter on the record's source label. `None` or `"all"` disables it.
    pub platform_hint: Option<String>,
    pub limit: usize,
    pub recency_days: u32,
    pub country: String,
    pub radius: Option<u32>,
    pub remote: bool,
    pub chips: Option<String>,
    pub next_page_token: Option<String>,
    pub uds: Option<String>,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            platform_hint: None,
            limit: DEFAULT_RESULT_LIMIT,
            recency_days: DEFAULT_RECENCY_DAYS,
            country: DEFAULT_COUNTRY.to_string(),
            radius: None,
            remote: false,
            chips: None,
            next_page_token: None,
            uds: None,
        }
    }

    /// `"<keywords> jobs in <location>"` with spaces replaced by `+`.
    ///
    /// The result is percent-encoded again when placed on the URL, so the
    /// upstream receives the literal `+` characters.
    pub fn composed_query(&self) -> String {
        format!("{} jobs in {}", self.keywords, self.location).replace(' ', "+")
    }

    /// Synthesizes a recency chip when no explicit chips were supplied.
    pub fn effective_chips(&self) -> String {
        match self.chips.as_deref().filter(|chips| !chips.is_empty()) {
            Some(chips) => chips.to_string(),
            None => format!("date_posted:{}d", self.recency_days),
        }
    }

    /// Query parameters in upstream order, absent values omitted.
    pub fn upstream_params(&self, api_key: &str, language: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", api_key.to_string()),
            ("query", self.composed_query()),
            ("country", self.country.clone()),
            ("language", language.to_string()),
            ("chips", self.effective_chips()),
        ];

        let optional = [
            ("next_page_token", self.next_page_token.clone()),
            (
                "lrad",
                self.radius
                    .filter(|radius| *radius > 0 && !self.remote)
                    .map(|radius| radius.to_string()),
            ),
            ("ltype", self.remote.then(|| REMOTE_LTYPE.to_string())),
            ("uds", self.uds.clone()),
        ];
        params.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v))),
        );

        params
    }
}

/// Source of normalized job records.
///
/// `try_search` keeps upstream failures distinguishable from empty results;
/// `search` collapses both into an empty vector, which is what the front-ends use.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn try_search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, SearchError>;

    async fn search(&self, query: &SearchQuery) -> Vec<JobRecord> {
        match self.try_search(query).await {
            Ok(records) => records,
            Err(SearchError::MissingResults) => {
                info!("no job results found in upstream response");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "job search failed; returning no results");
                Vec::new()
            }
        }
    }
}

/// HTTP client for the upstream job-search API.
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl SearchClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key,
            language: config.language.clone(),
        })
    }

    async fn fetch_payload(&self, query: &SearchQuery) -> Result<PayloadView, SearchError> {
        let params = query.upstream_params(&self.api_key, &self.language);
        debug!(
            endpoint = %self.endpoint,
            query = %query.composed_query(),
            chips = %query.effective_chips(),
            "requesting upstream job search"
        );

        let response = self.http.get(&self.endpoint).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(PayloadView::from_value(value))
    }
}

#[async_trait]
impl JobSource for SearchClient {
    async fn try_search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, SearchError> {
        let mut payload = self.fetch_payload(query).await?;

        if let Some(message) = payload.error.take() {
            return Err(SearchError::Upstream(message));
        }
        if payload.jobs.is_none() {
            return Err(SearchError::MissingResults);
        }

        let records = collect_records(payload, query.platform_hint.as_deref(), query.limit);
        info!(count = records.len(), limit = query.limit, "upstream job search completed");
        Ok(records)
    }
}
