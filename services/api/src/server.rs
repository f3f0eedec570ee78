use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use taxprep_ai::config::AppConfig;
use taxprep_ai::error::AppError;
use taxprep_ai::telemetry;
use taxprep_ai::workflows::intake::{IntakeService, RoutingPolicy, TaxPro};
use taxprep_ai::workflows::roster::RosterImporter;

use crate::cli::ServeArgs;
use crate::infra::{default_roster, AppState, InMemoryProfileStore, LoggingReminderDispatcher};
use crate::routes::with_intake_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(roster) = args.roster.take() {
        config.roster.path = Some(roster);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster: Vec<TaxPro> = match &config.roster.path {
        Some(path) => RosterImporter::from_path(path)?,
        None => default_roster(),
    };
    let roster_size = roster.len();

    let store = Arc::new(InMemoryProfileStore::default());
    let dispatcher = Arc::new(LoggingReminderDispatcher);
    let intake_service = Arc::new(IntakeService::new(
        store,
        dispatcher,
        RoutingPolicy::default(),
    ));
    intake_service
        .seed_roster(roster)
        .map_err(|err| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                err.to_string(),
            ))
        })?;

    let app = with_intake_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, roster_size, "tax intake orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
