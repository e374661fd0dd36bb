use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use storefront::checkout::cod::{
    CodChargeEvent, CodLedger, CodPricing, CodRules, CodSettings, LedgerError, PricingStrategy,
    SettingsError, SettingsStore, TimeRestrictions,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Clone)]
pub(crate) struct InMemorySettingsStore {
    document: Arc<Mutex<CodSettings>>,
}

impl InMemorySettingsStore {
    pub(crate) fn with_document(document: CodSettings) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn fetch(&self) -> Result<CodSettings, SettingsError> {
        let guard = self.document.lock().expect("settings mutex poisoned");
        Ok(guard.clone())
    }

    fn persist(&self, settings: CodSettings) -> Result<CodSettings, SettingsError> {
        let mut guard = self.document.lock().expect("settings mutex poisoned");
        *guard = settings;
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCodLedger {
    events: Arc<Mutex<Vec<CodChargeEvent>>>,
}

impl CodLedger for InMemoryCodLedger {
    fn append(&self, event: CodChargeEvent) -> Result<(), LedgerError> {
        let mut guard = self.events.lock().expect("ledger mutex poisoned");
        guard.push(event);
        Ok(())
    }

    fn events(&self) -> Result<Vec<CodChargeEvent>, LedgerError> {
        let guard = self.events.lock().expect("ledger mutex poisoned");
        Ok(guard.clone())
    }
}

/// Seed document used until an administrator writes their own through the
/// settings endpoint.
pub(crate) fn default_cod_settings() -> CodSettings {
    CodSettings {
        enabled: true,
        pricing: CodPricing {
            strategy: PricingStrategy::Percentage,
            fixed_amount: 40.0,
            percentage: 2.0,
            min_charge: 30.0,
            max_charge: 200.0,
            ..CodPricing::default()
        },
        rules: CodRules {
            min_order_value: 100.0,
            max_order_value: 50_000.0,
            time_restrictions: TimeRestrictions {
                enabled: false,
                start_time: "09:00".to_string(),
                end_time: "21:00".to_string(),
                days_of_week: Vec::new(),
            },
            ..CodRules::default()
        },
        ..CodSettings::default()
    }
}

pub(crate) fn parse_order_time(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM ({err})"))
}
