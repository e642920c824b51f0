use crate::cli::ServeArgs;
use crate::infra::{build_service, seed_demo_entries, AppState};
use crate::routes::with_achievement_routes;
use accredit::config::AppConfig;
use accredit::error::AppError;
use accredit::telemetry;
use accredit::workflows::achievements::SystemClock;
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

    let service = build_service(&config.registry.extra_organizers, Arc::new(SystemClock));
    if args.seed_demo {
        let seeded = seed_demo_entries(&service)?;
        info!(records = seeded.len(), "demo achievements loaded");
    }

    let app = with_achievement_routes(Arc::new(service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        extra_organizers = config.registry.extra_organizers.len(),
        "achievement verification service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
