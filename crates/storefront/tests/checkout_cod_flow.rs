//! End-to-end checkout COD scenarios driven through the public service facade
//! and HTTP router, without reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use storefront::checkout::cod::{
        CheckoutCodService, CodChargeEvent, CodLedger, CodPricing, CodSettings, LedgerError,
        PricingStrategy, SettingsError, SettingsStore,
    };

    #[derive(Default)]
    pub struct MemoryStore {
        document: Mutex<CodSettings>,
    }

    impl MemoryStore {
        pub fn with_document(document: CodSettings) -> Self {
            Self {
                document: Mutex::new(document),
            }
        }
    }

    impl SettingsStore for MemoryStore {
        fn fetch(&self) -> Result<CodSettings, SettingsError> {
            Ok(self.document.lock().expect("settings mutex poisoned").clone())
        }

        fn persist(&self, settings: CodSettings) -> Result<CodSettings, SettingsError> {
            let mut guard = self.document.lock().expect("settings mutex poisoned");
            *guard = settings;
            Ok(guard.clone())
        }
    }

    #[derive(Default)]
    pub struct MemoryLedger {
        events: Mutex<Vec<CodChargeEvent>>,
    }

    impl CodLedger for MemoryLedger {
        fn append(&self, event: CodChargeEvent) -> Result<(), LedgerError> {
            self.events.lock().expect("ledger mutex poisoned").push(event);
            Ok(())
        }

        fn events(&self) -> Result<Vec<CodChargeEvent>, LedgerError> {
            Ok(self.events.lock().expect("ledger mutex poisoned").clone())
        }
    }

    pub fn storefront_settings() -> CodSettings {
        CodSettings {
            enabled: true,
            pricing: CodPricing {
                strategy: PricingStrategy::Percentage,
                percentage: 2.0,
                min_charge: 30.0,
                max_charge: 200.0,
                ..CodPricing::default()
            },
            ..CodSettings::default()
        }
    }

    pub fn build_service(
        settings: CodSettings,
    ) -> Arc<CheckoutCodService<MemoryStore, MemoryLedger>> {
        Arc::new(CheckoutCodService::new(
            Arc::new(MemoryStore::with_document(settings)),
            Arc::new(MemoryLedger::default()),
        ))
    }

    pub async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }
}

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::json;
use storefront::checkout::cod::{
    checkout_cod_router, CartLine, CartSnapshot, CheckoutCodService, DeliveryAddress, Zone,
};
use tower::ServiceExt;

use common::{build_service, read_json_body, storefront_settings, MemoryLedger, MemoryStore};

fn sample_cart(unit_price: f64) -> CartSnapshot {
    CartSnapshot::new(vec![CartLine {
        product_id: "sku-kettle".to_string(),
        category_id: Some("cat-kitchen".to_string()),
        quantity: 1,
        unit_price,
    }])
}

fn sample_address() -> DeliveryAddress {
    DeliveryAddress {
        pincode: "560001".to_string(),
        state: "Karnataka".to_string(),
        city: "Bengaluru".to_string(),
    }
}

fn noon() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 3)
        .expect("valid date")
        .and_time(NaiveTime::from_hms_opt(12, 0, 0).expect("valid time"))
}

#[test]
fn checkout_flow_charges_and_records_cod_orders() {
    let service = build_service(storefront_settings());

    let decision = service
        .check(&sample_cart(500.0), &sample_address(), None, noon())
        .expect("store reachable");
    // 2% of 500 is 10, clamped up to the 30 floor.
    assert_eq!(decision.charge(), Some(30.0));

    let placed_at = Utc.with_ymd_and_hms(2026, 3, 3, 6, 30, 0).unwrap();
    service
        .record_cod_order("ord-42", 30.0, placed_at)
        .expect("ledger append");

    let settings = service.settings().expect("store reachable");
    assert_eq!(settings.analytics.total_cod_orders, 1);
    assert_eq!(settings.analytics.total_cod_revenue, 30.0);
    assert_eq!(settings.analytics.last_updated, Some(placed_at));
}

#[tokio::test]
async fn admin_can_reshape_pricing_through_the_router() {
    let service: Arc<CheckoutCodService<MemoryStore, MemoryLedger>> =
        build_service(storefront_settings());
    let router = checkout_cod_router(service);

    // Carve out a metro zone with a flat 80 surcharge.
    let mut revised = storefront_settings();
    revised.pricing.location_based.enabled = true;
    revised.pricing.location_based.zones = vec![Zone {
        name: "metro".to_string(),
        pincodes: vec!["560001".to_string()],
        charge: 80.0,
        ..Zone::default()
    }];

    let put = axum::http::Request::put("/api/settings/cod")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&revised).unwrap()))
        .unwrap();
    let response = router.clone().oneshot(put).await.expect("route executes");
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    // The next checkout in that pincode pays the zone charge, not the
    // percentage strategy.
    let body = json!({
        "cartItems": [
            { "productId": "sku-kettle", "quantity": 1, "unitPrice": 500.0 }
        ],
        "address": { "pincode": "560001", "state": "Karnataka", "city": "Bengaluru" },
        "orderTime": "2026-03-03T12:00:00+05:30"
    });
    let post = axum::http::Request::post("/api/orders/check-cod")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = router.oneshot(post).await.expect("route executes");
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["available"], json!(true));
    assert_eq!(payload["codCharge"], json!(80.0));
}

#[tokio::test]
async fn shopper_sees_reason_when_state_is_excluded() {
    let mut settings = storefront_settings();
    settings.rules.excluded_states = vec!["Kerala".to_string()];
    let router = checkout_cod_router(build_service(settings));

    let body = json!({
        "cartItems": [
            { "productId": "sku-kettle", "quantity": 1, "unitPrice": 500.0 }
        ],
        "address": { "pincode": "682001", "state": "Kerala", "city": "Kochi" },
        "orderTime": "2026-03-03T12:00:00+05:30"
    });
    let post = axum::http::Request::post("/api/orders/check-cod")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = router.oneshot(post).await.expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["available"], json!(false));
    assert_eq!(payload["reason"], json!("state Kerala excluded from COD"));
}
