use crate::cli::ServeArgs;
use crate::routes::{with_search_routes, AppState};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_scout::config::AppConfig;
use job_scout::error::AppError;
use job_scout::search::{JobSearchService, SearchClient};
use job_scout::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let client = SearchClient::new(&config.upstream)?;
    let search_service = JobSearchService::new(Arc::new(client));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_search_routes(search_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        upstream = %config.upstream.endpoint,
        timeout_secs = config.upstream.timeout.as_secs(),
        "job search service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
