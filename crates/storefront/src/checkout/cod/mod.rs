//! Cash-on-delivery eligibility and surcharge policy.
//!
//! The engine answers one question per checkout attempt: given a cart, a
//! delivery address, an optional courier, and the order time, is COD allowed,
//! and what surcharge applies? Eligibility gates run in a fixed order and the
//! first failure wins; the surcharge then comes from the first applicable
//! strategy in zone -> courier -> default precedence. Administrators edit the
//! settings document; the engine only ever reads an immutable snapshot of it.

pub mod analytics;
pub mod domain;
pub mod engine;
pub mod router;
pub mod service;
pub mod settings;
pub mod store;

#[cfg(test)]
mod tests;

pub use analytics::{CodAnalyticsView, CodChargeEvent, CodLedger, LedgerError};
pub use domain::{CartLine, CartSnapshot, DeliveryAddress};
pub use engine::{CodDecision, CodDenial, CodPolicyEngine};
pub use router::{checkout_cod_router, CodCheckRequest, CodCheckResponse};
pub use service::{CheckoutCodError, CheckoutCodService, PublicCodView};
pub use settings::{
    CodPricing, CodRules, CodSettings, CourierCharges, CourierRule, LocationPricing,
    PricingStrategy, PricingTier, TimeRestrictions, Zone,
};
pub use store::{SettingsError, SettingsStore};
