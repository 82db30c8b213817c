use crate::cli::ServeArgs;
use crate::infra::{prediction_service, AppState};
use crate::routes::with_prediction_routes;
use absentee_insight::config::AppConfig;
use absentee_insight::error::AppError;
use absentee_insight::telemetry;
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

    let service = Arc::new(prediction_service(&config)?);
    info!(
        roster = config
            .roster_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "reference".to_string()),
        seeded = config.scoring.seed.is_some(),
        latency_ms = config.scoring.simulated_latency_ms,
        "prediction service initialised"
    );

    let app = with_prediction_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "absence prediction service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
