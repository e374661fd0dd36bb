use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::analytics::{CodAnalyticsView, CodChargeEvent, CodLedger, LedgerError};
use super::domain::{CartSnapshot, DeliveryAddress};
use super::engine::{CodDecision, CodPolicyEngine};
use super::settings::CodSettings;
use super::store::{SettingsError, SettingsStore};

/// Service composing the settings store, the analytics ledger, and the policy
/// engine behind one facade for the checkout and admin surfaces.
pub struct CheckoutCodService<S, L> {
    store: Arc<S>,
    ledger: Arc<L>,
}

impl<S, L> CheckoutCodService<S, L>
where
    S: SettingsStore + 'static,
    L: CodLedger + 'static,
{
    pub fn new(store: Arc<S>, ledger: Arc<L>) -> Self {
        Self { store, ledger }
    }

    /// Evaluate COD for one checkout attempt against a single settings
    /// snapshot fetched up front.
    pub fn check(
        &self,
        cart: &CartSnapshot,
        address: &DeliveryAddress,
        courier: Option<&str>,
        order_time: NaiveDateTime,
    ) -> Result<CodDecision, CheckoutCodError> {
        let snapshot = self.store.fetch()?;
        let engine = CodPolicyEngine::new(snapshot);
        let decision = engine.evaluate(cart, address, courier, order_time);

        debug!(
            available = decision.is_available(),
            subtotal = cart.subtotal(),
            "evaluated cod decision"
        );

        Ok(decision)
    }

    /// Record an order that was actually placed with COD. Called by the
    /// checkout flow after placement, never during evaluation, so the engine
    /// itself stays side-effect free.
    pub fn record_cod_order(
        &self,
        order_id: &str,
        charge: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), CheckoutCodError> {
        self.ledger.append(CodChargeEvent {
            order_id: order_id.to_string(),
            charge,
            recorded_at,
        })?;
        Ok(())
    }

    /// Admin view: the stored document with analytics derived from the
    /// ledger overlaid on top of any stale stored counters.
    pub fn settings(&self) -> Result<CodSettings, CheckoutCodError> {
        let mut settings = self.store.fetch()?;
        settings.analytics = self.analytics()?;
        Ok(settings)
    }

    pub fn analytics(&self) -> Result<CodAnalyticsView, CheckoutCodError> {
        let events = self.ledger.events()?;
        Ok(CodAnalyticsView::from_events(&events))
    }

    pub fn update_settings(&self, settings: CodSettings) -> Result<CodSettings, CheckoutCodError> {
        let stored = self.store.persist(settings)?;
        Ok(stored)
    }

    /// Reduced, non-sensitive projection for storefront pages.
    pub fn public_settings(&self) -> Result<PublicCodView, CheckoutCodError> {
        let settings = self.store.fetch()?;
        Ok(PublicCodView {
            cod_enabled: settings.enabled,
        })
    }
}

/// Projection exposed on the public settings endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCodView {
    pub cod_enabled: bool,
}

/// Error raised by the checkout COD service.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutCodError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
