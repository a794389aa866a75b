use super::client::{SearchQuery, DEFAULT_COUNTRY};
use super::filter::PlatformSelection;
use super::translator::{DatePosted, ExperienceLevel, FilterSelection, JobType, TranslateError};
use crate::catalog::SUPPORTED_PLATFORMS;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_COUNT: usize = 10;
pub const DEFAULT_DAYS_AGO: u32 = 7;
pub const DEFAULT_SEARCH_RADIUS: u32 = 10;

/// A search as submitted by a front-end.
///
/// Field names and defaults follow the JSON body of `POST /api/jobs/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
    #[serde(default = "default_true")]
    pub select_all: bool,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_days_ago")]
    pub days_ago: u32,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default = "default_search_radius")]
    pub search_radius: u32,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default = "default_date_posted")]
    pub date_posted: String,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_platforms() -> Vec<String> {
    SUPPORTED_PLATFORMS.iter().map(|name| name.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_days_ago() -> u32 {
    DEFAULT_DAYS_AGO
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_search_radius() -> u32 {
    DEFAULT_SEARCH_RADIUS
}

fn default_job_type() -> String {
    JobType::Any.label().to_string()
}

fn default_date_posted() -> String {
    DatePosted::AnyTime.label().to_string()
}

fn default_experience_level() -> String {
    ExperienceLevel::Any.label().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Please enter at least one keyword to search for")]
    MissingKeywords,
    #[error(transparent)]
    Filter(#[from] TranslateError),
}

impl SearchRequest {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: String::new(),
            platforms: default_platforms(),
            select_all: true,
            count: DEFAULT_COUNT,
            days_ago: DEFAULT_DAYS_AGO,
            country: default_country(),
            remote_only: false,
            search_radius: DEFAULT_SEARCH_RADIUS,
            job_type: default_job_type(),
            date_posted: default_date_posted(),
            experience_level: default_experience_level(),
        }
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.trim().is_empty()
    }

    pub fn filters(&self) -> Result<FilterSelection, TranslateError> {
        FilterSelection::parse(&self.date_posted, &self.job_type, &self.experience_level)
    }

    pub fn platform_selection(&self) -> PlatformSelection {
        PlatformSelection {
            platforms: self.platforms.clone(),
            select_all: self.select_all,
        }
    }

    /// Validates keywords and translates the UI filters into an upstream query.
    ///
    /// Platform narrowing is left to [`PlatformSelection`], so the query never
    /// carries a platform hint.
    pub fn to_query(&self) -> Result<SearchQuery, RequestError> {
        if !self.has_keywords() {
            return Err(RequestError::MissingKeywords);
        }
        let chips = self.filters()?.chips();

        Ok(SearchQuery {
            keywords: self.keywords.clone(),
            location: self.location.clone(),
            platform_hint: None,
            limit: self.count,
            recency_days: self.days_ago,
            country: self.country.clone(),
            radius: (self.search_radius > 0 && !self.remote_only).then_some(self.search_radius),
            remote: self.remote_only,
            chips,
            next_page_token: None,
            uds: None,
        })
    }
}
