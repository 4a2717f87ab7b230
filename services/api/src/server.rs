use crate::cli::ServeArgs;
use crate::infra::{advisor_service, credit_service, AppState};
use crate::routes::with_credit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_advisor::config::AppConfig;
use credit_advisor::error::AppError;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.advisor.api_key.is_none() {
        warn!("OPENAI_API_KEY not set; advisor questions will report an inline error");
    }

    let credit = Arc::new(credit_service(&config.storage));
    let advisor = Arc::new(advisor_service(&config.advisor)?);

    let app = with_credit_routes(credit, advisor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        clients = %config.storage.clients_csv.display(),
        history = %config.storage.history_csv.display(),
        "credit advisor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
