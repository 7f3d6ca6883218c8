use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubmissionRepository};
use crate::routes::with_operational_routes;
use crate::sqlite_repository::SqliteSubmissionRepository;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use durability::config::AppConfig;
use durability::error::AppError;
use durability::telemetry;
use durability::workflows::sustainability::{SubmissionRepository, SustainabilityService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    match config.storage.database_url.as_deref() {
        Some(database_url) => {
            let repository = SqliteSubmissionRepository::connect(database_url).await?;
            info!("submission history stored in sqlite");
            serve(config, Arc::new(repository)).await
        }
        None => {
            warn!("APP_DATABASE_URL not set; submission history is kept in memory only");
            serve(config, Arc::new(InMemorySubmissionRepository::default())).await
        }
    }
}

async fn serve<R>(config: AppConfig, repository: Arc<R>) -> Result<(), AppError>
where
    R: SubmissionRepository + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(SustainabilityService::new(repository));

    let app = with_operational_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "durability score service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
