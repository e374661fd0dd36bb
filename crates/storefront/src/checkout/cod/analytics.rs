use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only record of one order actually placed with COD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodChargeEvent {
    pub order_id: String,
    pub charge: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Ledger abstraction. Appending is the only write; aggregates are derived on
/// read, so two checkouts landing at once never race on shared counters.
pub trait CodLedger: Send + Sync {
    fn append(&self, event: CodChargeEvent) -> Result<(), LedgerError>;
    fn events(&self) -> Result<Vec<CodChargeEvent>, LedgerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Aggregates surfaced in the admin settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodAnalyticsView {
    pub total_cod_orders: u64,
    pub total_cod_revenue: f64,
    pub average_cod_charge: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl CodAnalyticsView {
    pub fn from_events(events: &[CodChargeEvent]) -> Self {
        let total_cod_orders = events.len() as u64;
        let total_cod_revenue: f64 = events.iter().map(|event| event.charge).sum();
        let average_cod_charge = if total_cod_orders == 0 {
            0.0
        } else {
            total_cod_revenue / total_cod_orders as f64
        };
        let last_updated = events.iter().map(|event| event.recorded_at).max();

        Self {
            total_cod_orders,
            total_cod_revenue,
            average_cod_charge,
            last_updated,
        }
    }
}
