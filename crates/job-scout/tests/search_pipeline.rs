use job_scout::config::UpstreamConfig;
use job_scout::search::{JobSearchService, RequestError, SearchClient, SearchRequest};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn upstream_payload() -> serde_json::Value {
    json!({
        "jobs_results": [
            {
                "title": "Data Scientist",
                "company_name": "Banco Popular",
                "location": "Santo Domingo",
                "via": "LinkedIn",
                "description": "Model credit risk.",
                "detected_extensions": { "schedule_type": "Full-time", "posted_at": "2 days ago" },
                "apply_link": { "link": "https://linkedin.example/jobs/1" }
            },
            {
                "title": "Machine Learning Engineer",
                "company_name": "Claro",
                "location": "Remote",
                "via": "Glassdoor",
                "job_id": "glassdoor-2"
            },
            {
                "title": "Analytics Lead",
                "company_name": "Altice",
                "via": "via Indeed",
                "snippet": "Lead the analytics team.",
                "apply_options": [{ "title": "Indeed", "link": "https://indeed.example/3" }]
            }
        ],
        "related_links": [{ "text": "Apply on company site", "link": "https://careers.example" }]
    })
}

fn request_body() -> SearchRequest {
    serde_json::from_value(json!({
        "keywords": "Data Scientist",
        "location": "DO",
        "platforms": ["LinkedIn", "Indeed"],
        "select_all": false,
        "count": 10,
        "remote_only": true,
        "job_type": "Full-time"
    }))
    .expect("valid request body")
}

fn service_for(server: &mockito::Server) -> JobSearchService<SearchClient> {
    let config = UpstreamConfig::new(format!("{}/google_jobs", server.url()), "integration-key");
    let client = SearchClient::new(&config).expect("client builds");
    JobSearchService::new(Arc::new(client))
}

#[tokio::test]
async fn remote_full_time_search_filters_to_selected_platforms() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/google_jobs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "Data+Scientist+jobs+in+DO".into()),
            Matcher::UrlEncoded("chips".into(), "employment_type:FULLTIME".into()),
            Matcher::UrlEncoded("ltype".into(), "1".into()),
            Matcher::UrlEncoded("country".into(), "US".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(upstream_payload().to_string())
        .create_async()
        .await;
    let lrad_mock = server
        .mock("GET", "/google_jobs")
        .match_query(Matcher::Regex("lrad=".into()))
        .expect(0)
        .create_async()
        .await;

    let results = service_for(&server)
        .search(&request_body())
        .await
        .expect("search runs");

    mock.assert_async().await;
    lrad_mock.assert_async().await;

    assert_eq!(results.len(), 2);
    assert!(results.jobs.iter().all(|job| {
        let platform = job.platform.to_lowercase();
        platform.contains("linkedin") || platform.contains("indeed")
    }));

    let first = &results.jobs[0];
    assert_eq!(first.company, "Banco Popular");
    assert_eq!(first.job_type, "Full-time");
    assert_eq!(first.date_posted, "2 days ago");
    assert_eq!(first.apply_url.as_deref(), Some("https://linkedin.example/jobs/1"));

    let second = &results.jobs[1];
    assert_eq!(second.description, "Lead the analytics team.");
    assert_eq!(second.location, "Unknown Location");
    assert_eq!(second.apply_url.as_deref(), Some("https://indeed.example/3"));
}

#[tokio::test]
async fn select_all_keeps_every_platform() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/google_jobs")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(upstream_payload().to_string())
        .create_async()
        .await;

    let mut request = request_body();
    request.select_all = true;
    let results = service_for(&server)
        .search(&request)
        .await
        .expect("search runs");

    assert_eq!(results.len(), 3);
    assert_eq!(
        results.jobs[1].apply_url.as_deref(),
        Some("https://careers.example")
    );
}

#[tokio::test]
async fn missing_keywords_never_reach_upstream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut request = request_body();
    request.keywords = String::new();
    let error = service_for(&server)
        .search(&request)
        .await
        .expect_err("keywords required");

    assert_eq!(error, RequestError::MissingKeywords);
    mock.assert_async().await;
}
