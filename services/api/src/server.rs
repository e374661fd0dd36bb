use crate::cli::ServeArgs;
use crate::infra::{default_cod_settings, AppState, InMemoryCodLedger, InMemorySettingsStore};
use crate::routes::with_checkout_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use storefront::checkout::cod::CheckoutCodService;
use storefront::config::AppConfig;
use storefront::error::AppError;
use storefront::telemetry;
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

    let store = Arc::new(InMemorySettingsStore::with_document(default_cod_settings()));
    let ledger = Arc::new(InMemoryCodLedger::default());
    let checkout_service = Arc::new(CheckoutCodService::new(store, ledger));

    let app = with_checkout_routes(checkout_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "storefront checkout service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
