use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::checkout::cod::analytics::{CodChargeEvent, CodLedger, LedgerError};
use crate::checkout::cod::domain::{CartLine, CartSnapshot, DeliveryAddress};
use crate::checkout::cod::engine::{CodDecision, CodPolicyEngine};
use crate::checkout::cod::service::CheckoutCodService;
use crate::checkout::cod::settings::{CodPricing, CodSettings, PricingStrategy};
use crate::checkout::cod::store::{SettingsError, SettingsStore};

/// Permissive baseline: COD on, flat 50 surcharge, no bounds or exclusions.
pub(super) fn base_settings() -> CodSettings {
    CodSettings {
        enabled: true,
        pricing: CodPricing {
            strategy: PricingStrategy::Fixed,
            fixed_amount: 50.0,
            ..CodPricing::default()
        },
        ..CodSettings::default()
    }
}

pub(super) fn line(
    product_id: &str,
    category_id: Option<&str>,
    quantity: u32,
    unit_price: f64,
) -> CartLine {
    CartLine {
        product_id: product_id.to_string(),
        category_id: category_id.map(str::to_string),
        quantity,
        unit_price,
    }
}

pub(super) fn cart_of(subtotal: f64) -> CartSnapshot {
    CartSnapshot::new(vec![line("sku-1", Some("cat-general"), 1, subtotal)])
}

pub(super) fn address() -> DeliveryAddress {
    DeliveryAddress {
        pincode: "560001".to_string(),
        state: "Karnataka".to_string(),
        city: "Bengaluru".to_string(),
    }
}

/// Tuesday 2026-03-03 at the given clock time (weekday 2, Sunday-based).
pub(super) fn tuesday_at(clock: &str) -> NaiveDateTime {
    let date = NaiveDate::from_ymd_opt(2026, 3, 3).expect("valid date");
    let time = NaiveTime::parse_from_str(clock, "%H:%M").expect("valid clock");
    date.and_time(time)
}

pub(super) fn evaluate(settings: CodSettings, cart: &CartSnapshot) -> CodDecision {
    CodPolicyEngine::new(settings).evaluate(cart, &address(), None, tuesday_at("12:00"))
}

#[derive(Default)]
pub(super) struct MemoryStore {
    document: Mutex<CodSettings>,
}

impl MemoryStore {
    pub(super) fn with_document(document: CodSettings) -> Self {
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
pub(super) struct MemoryLedger {
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

pub(super) struct UnavailableStore;

impl SettingsStore for UnavailableStore {
    fn fetch(&self) -> Result<CodSettings, SettingsError> {
        Err(SettingsError::Unavailable(
            "settings backend offline".to_string(),
        ))
    }

    fn persist(&self, _settings: CodSettings) -> Result<CodSettings, SettingsError> {
        Err(SettingsError::Unavailable(
            "settings backend offline".to_string(),
        ))
    }
}

pub(super) fn build_service(
    settings: CodSettings,
) -> Arc<CheckoutCodService<MemoryStore, MemoryLedger>> {
    Arc::new(CheckoutCodService::new(
        Arc::new(MemoryStore::with_document(settings)),
        Arc::new(MemoryLedger::default()),
    ))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
