use crate::cli::ServeArgs;
use crate::demo::seed_demo_store;
use crate::infra::{AppState, InMemoryLifeAreaStore};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use wisdom_score::config::AppConfig;
use wisdom_score::error::AppError;
use wisdom_score::scoring::{FulfillmentService, LifeAreaStore};
use wisdom_score::telemetry;

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

    let store = Arc::new(InMemoryLifeAreaStore::default());
    if args.seed_demo {
        seed_demo_store(&store, Utc::now())?;
        info!("seeded in-memory store with demo life areas");
    }
    let service = Arc::new(FulfillmentService::new(store, config.scoring));

    if let Some(interval) = config.scoring.recalculation_interval() {
        tokio::spawn(recalculate_periodically(service.clone(), interval));
        info!(
            interval_secs = interval.as_secs(),
            "periodic recalculation enabled"
        );
    }

    let app = with_scoring_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fulfillment scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Runs the batch on the blocking pool every `interval`; the first tick fires immediately.
async fn recalculate_periodically<S>(service: Arc<FulfillmentService<S>>, interval: Duration)
where
    S: LifeAreaStore + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let batch_service = service.clone();
        let outcome =
            tokio::task::spawn_blocking(move || batch_service.recalculate_all(Utc::now())).await;

        match outcome {
            Ok(Ok(summary)) if !summary.is_clean() => {
                warn!(
                    failed = summary.failures.len(),
                    "periodic recalculation finished with failures"
                );
            }
            Ok(Ok(_)) => {}
            Ok(Err(error)) => warn!(%error, "periodic recalculation could not list life areas"),
            Err(error) => warn!(%error, "periodic recalculation task failed"),
        }
    }
}
