use crate::cli::ServeArgs;
use crate::infra::{populate_catalog, AppState, InMemoryShortlistRepository};
use crate::routes::with_counselling_routes;
use admit_compass::config::AppConfig;
use admit_compass::counselling::CounsellingService;
use admit_compass::error::AppError;
use admit_compass::scoring::FitPolicy;
use admit_compass::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(populate_catalog(config.catalog.seed_csv.as_deref())?);
    let shortlists = Arc::new(InMemoryShortlistRepository::default());
    let counselling_service = Arc::new(
        CounsellingService::new(catalog, shortlists, FitPolicy::default())
            .with_advisor_top_n(config.advisor.top_n),
    );

    let app = with_counselling_routes(counselling_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admit compass ready");

    axum::serve(listener, app).await?;
    Ok(())
}
