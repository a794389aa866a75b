use std::sync::Arc;

use super::client::JobSource;
use super::record::JobRecord;
use super::request::{RequestError, SearchRequest};
use tracing::info;

/// Output of one search: filtered records in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub jobs: Vec<JobRecord>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Chains filter translation, the upstream search and platform filtering.
pub struct JobSearchService<S> {
    source: Arc<S>,
}

impl<S> Clone for JobSearchService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: JobSource + 'static> JobSearchService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Runs one search. Request validation happens before any upstream call;
    /// upstream failures surface as an empty result.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults, RequestError> {
        let query = request.to_query()?;
        let fetched = self.source.search(&query).await;
        let fetched_count = fetched.len();
        let jobs = request.platform_selection().apply(fetched);

        info!(
            keywords = %request.keywords,
            location = %request.location,
            fetched = fetched_count,
            returned = jobs.len(),
            "job search served"
        );

        Ok(SearchResults { jobs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::client::{SearchError, SearchQuery};
    use crate::search::record::sample_record;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        queries: Mutex<Vec<SearchQuery>>,
        fail: bool,
    }

    #[async_trait]
    impl JobSource for RecordingSource {
        async fn try_search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>, SearchError> {
            self.queries
                .lock()
                .expect("query log poisoned")
                .push(query.clone());
            if self.fail {
                return Err(SearchError::Upstream("quota exhausted".to_string()));
            }
            Ok(vec![
                sample_record("a", "LinkedIn"),
                sample_record("b", "Monster"),
                sample_record("c", "Indeed"),
            ])
        }
    }

    #[tokio::test]
    async fn filters_by_selected_platforms() {
        let source = Arc::new(RecordingSource::default());
        let service = JobSearchService::new(source.clone());
        let mut request = SearchRequest::new("Data Scientist");
        request.platforms = vec!["LinkedIn".to_string(), "Indeed".to_string()];
        request.select_all = false;

        let results = service.search(&request).await.expect("search runs");
        let titles: Vec<&str> = results.jobs.iter().map(|job| job.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(source.queries.lock().expect("log").len(), 1);
    }

    #[tokio::test]
    async fn missing_keywords_skip_upstream() {
        let source = Arc::new(RecordingSource::default());
        let service = JobSearchService::new(source.clone());

        let error = service
            .search(&SearchRequest::new(""))
            .await
            .expect_err("keywords required");
        assert_eq!(error, RequestError::MissingKeywords);
        assert!(source.queries.lock().expect("log").is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_yields_empty_results() {
        let source = Arc::new(RecordingSource {
            fail: true,
            ..RecordingSource::default()
        });
        let service = JobSearchService::new(source);

        let results = service
            .search(&SearchRequest::new("Rust"))
            .await
            .expect("search runs");
        assert!(results.is_empty());
    }
}
