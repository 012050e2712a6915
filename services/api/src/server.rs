use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::{app_router, SessionService};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use recruitment_savings::config::AppConfig;
use recruitment_savings::error::AppError;
use recruitment_savings::savings::{SavingsEstimator, SavingsSessionService};
use recruitment_savings::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let estimator = SavingsEstimator::restaurant_france();
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        estimator,
    };

    let session_service = Arc::new(SavingsSessionService::new(
        Arc::new(InMemorySessionStore::default()),
        estimator,
        config.estimator.trigger_policy,
        config.estimator.session_idle_timeout(),
    ));
    spawn_session_pruner(session_service.clone());

    let app = app_router(session_service, app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        trigger_policy = ?config.estimator.trigger_policy,
        "recruitment savings estimator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_session_pruner(service: Arc<SessionService>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = service.prune_idle(Utc::now()) {
                warn!(error = %err, "failed to prune idle sessions");
            }
        }
    });
}
