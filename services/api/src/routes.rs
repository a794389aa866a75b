use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use job_scout::catalog::{countries, SUPPORTED_PLATFORMS};
use job_scout::error::AppError;
use job_scout::search::{JobRecord, JobSearchService, JobSource, SearchRequest};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) const NO_MATCHES_MESSAGE: &str = "No jobs found matching your criteria";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    pub(crate) count: usize,
    pub(crate) results: Vec<JobRecord>,
}

/// Job search endpoints backed by the given service.
pub(crate) fn job_routes<S>(service: JobSearchService<S>) -> Router
where
    S: JobSource + 'static,
{
    Router::new()
        .route("/api/jobs/search", post(search_endpoint::<S>))
        .route("/api/jobs/countries", get(countries_endpoint))
        .route("/api/jobs/platforms", get(platforms_endpoint))
        .with_state(service)
}

pub(crate) fn with_search_routes<S>(service: JobSearchService<S>) -> Router
where
    S: JobSource + 'static,
{
    job_routes(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn search_endpoint<S>(
    State(service): State<JobSearchService<S>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response, AppError>
where
    S: JobSource + 'static,
{
    let Json(request) = payload?;
    let results = service.search(&request).await?;

    if results.is_empty() {
        let payload = json!({
            "message": NO_MATCHES_MESSAGE,
            "results": [],
        });
        return Ok((StatusCode::OK, Json(payload)).into_response());
    }

    let response = SearchResponse {
        count: results.len(),
        results: results.jobs,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

pub(crate) async fn countries_endpoint() -> impl IntoResponse {
    (StatusCode::OK, Json(countries()))
}

pub(crate) async fn platforms_endpoint() -> impl IntoResponse {
    (StatusCode::OK, Json(SUPPORTED_PLATFORMS))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
