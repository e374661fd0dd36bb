use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::analytics::CodLedger;
use super::domain::{CartLine, CartSnapshot, DeliveryAddress};
use super::engine::CodDecision;
use super::service::CheckoutCodService;
use super::settings::CodSettings;
use super::store::SettingsStore;

/// Router builder preserving the wire contract the checkout UI and admin
/// panel already depend on.
pub fn checkout_cod_router<S, L>(service: Arc<CheckoutCodService<S, L>>) -> Router
where
    S: SettingsStore + 'static,
    L: CodLedger + 'static,
{
    Router::new()
        .route("/api/orders/check-cod", post(check_cod_handler::<S, L>))
        .route("/api/settings", get(settings_handler::<S, L>))
        .route("/api/settings/cod", put(update_settings_handler::<S, L>))
        .route(
            "/api/settings/public",
            get(public_settings_handler::<S, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodCheckRequest {
    pub cart_items: Vec<CartLine>,
    pub address: DeliveryAddress,
    #[serde(default)]
    pub courier: Option<String>,
    /// RFC 3339 with offset; defaults to now when omitted.
    #[serde(default)]
    pub order_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodCheckResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub(crate) async fn check_cod_handler<S, L>(
    State(service): State<Arc<CheckoutCodService<S, L>>>,
    axum::Json(request): axum::Json<CodCheckRequest>,
) -> Response
where
    S: SettingsStore + 'static,
    L: CodLedger + 'static,
{
    let CodCheckRequest {
        cart_items,
        address,
        courier,
        order_time,
    } = request;

    let cart = CartSnapshot::new(cart_items);
    let order_time = order_time
        .map(|stamp| stamp.naive_local())
        .unwrap_or_else(|| Local::now().naive_local());

    // Both outcomes are ordinary responses; only infrastructure failures
    // surface as errors.
    match service.check(&cart, &address, courier.as_deref(), order_time) {
        Ok(CodDecision::Available { charge }) => (
            StatusCode::OK,
            axum::Json(CodCheckResponse {
                available: true,
                cod_charge: Some(charge),
                reason: None,
            }),
        )
            .into_response(),
        Ok(CodDecision::Unavailable { reason }) => (
            StatusCode::OK,
            axum::Json(CodCheckResponse {
                available: false,
                cod_charge: None,
                reason: Some(reason.summary()),
            }),
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn settings_handler<S, L>(
    State(service): State<Arc<CheckoutCodService<S, L>>>,
) -> Response
where
    S: SettingsStore + 'static,
    L: CodLedger + 'static,
{
    match service.settings() {
        Ok(settings) => (StatusCode::OK, axum::Json(json!({ "cod": settings }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn update_settings_handler<S, L>(
    State(service): State<Arc<CheckoutCodService<S, L>>>,
    axum::Json(document): axum::Json<CodSettings>,
) -> Response
where
    S: SettingsStore + 'static,
    L: CodLedger + 'static,
{
    match service.update_settings(document) {
        Ok(stored) => (StatusCode::OK, axum::Json(json!({ "cod": stored }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn public_settings_handler<S, L>(
    State(service): State<Arc<CheckoutCodService<S, L>>>,
) -> Response
where
    S: SettingsStore + 'static,
    L: CodLedger + 'static,
{
    match service.public_settings() {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
