use serde::{Deserialize, Serialize};

use super::analytics::CodAnalyticsView;
use super::domain::DeliveryAddress;

/// Administrator-owned COD configuration document.
///
/// Edited through the admin panel and read-only to the engine. The document
/// may be partially populated mid-administration, so every field deserializes
/// leniently: missing booleans read as disabled, missing collections as empty,
/// missing amounts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodSettings {
    /// Global kill switch; when false COD is unavailable regardless of
    /// everything else.
    pub enabled: bool,
    pub pricing: CodPricing,
    pub courier_charges: CourierCharges,
    pub rules: CodRules,
    /// Stored aggregates. Ignored on read; the service overlays figures
    /// derived from the append-only ledger instead.
    pub analytics: CodAnalyticsView,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodPricing {
    /// Base-charge strategy applied when no location zone matches.
    #[serde(rename = "type")]
    pub strategy: PricingStrategy,
    pub fixed_amount: f64,
    pub percentage: f64,
    pub min_charge: f64,
    pub max_charge: f64,
    /// Evaluated in declaration order, first match wins. Overlapping ranges
    /// are resolved by that order, not rejected.
    pub tiers: Vec<PricingTier>,
    pub location_based: LocationPricing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingStrategy {
    #[default]
    Fixed,
    Percentage,
    Tiered,
    /// Legacy label kept so existing documents keep working; priced exactly
    /// like `Percentage`.
    Dynamic,
}

/// Order-subtotal range with a flat charge. An absent `max_amount` leaves the
/// range open-ended above.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingTier {
    pub min_amount: f64,
    pub max_amount: Option<f64>,
    pub charge: f64,
}

impl PricingTier {
    pub fn matches(&self, subtotal: f64) -> bool {
        subtotal >= self.min_amount && self.max_amount.map_or(true, |max| subtotal <= max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationPricing {
    pub enabled: bool,
    pub zones: Vec<Zone>,
}

/// Administrator-defined geographic grouping carrying its own charge and
/// clamp bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Zone {
    pub name: String,
    pub pincodes: Vec<String>,
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub charge: f64,
    pub min_charge: f64,
    pub max_charge: f64,
}

impl Zone {
    /// Pincode matches exactly; state and city comparisons ignore case.
    pub fn covers(&self, address: &DeliveryAddress) -> bool {
        self.pincodes.iter().any(|pin| pin == &address.pincode)
            || self
                .states
                .iter()
                .any(|state| state.eq_ignore_ascii_case(&address.state))
            || self
                .cities
                .iter()
                .any(|city| city.eq_ignore_ascii_case(&address.city))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourierCharges {
    pub enabled: bool,
    pub couriers: Vec<CourierRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourierRule {
    pub name: String,
    pub code: String,
    pub percentage: f64,
    pub min_charge: f64,
    pub max_charge: f64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodRules {
    /// Inclusive lower bound on the order subtotal.
    pub min_order_value: f64,
    /// Inclusive upper bound; zero deactivates the bound.
    pub max_order_value: f64,
    pub excluded_categories: Vec<String>,
    pub excluded_products: Vec<String>,
    pub excluded_pincodes: Vec<String>,
    pub excluded_states: Vec<String>,
    pub time_restrictions: TimeRestrictions,
}

/// Business-hours gate. Times are zero-padded 24h `HH:MM` strings and days of
/// week count from Sunday as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeRestrictions {
    pub enabled: bool,
    pub start_time: String,
    pub end_time: String,
    pub days_of_week: Vec<u8>,
}
