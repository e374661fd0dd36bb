mod pricing;
mod rules;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::{CartSnapshot, DeliveryAddress};
use super::settings::CodSettings;

/// Pure decision engine over one immutable settings snapshot.
///
/// Callers fetch a consistent snapshot once per checkout session and build an
/// engine from it, so concurrent evaluations need no coordination and two
/// calls with identical inputs always produce identical decisions.
pub struct CodPolicyEngine {
    settings: CodSettings,
}

impl CodPolicyEngine {
    pub fn new(settings: CodSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CodSettings {
        &self.settings
    }

    /// Ordered evaluation: the first failing gate short-circuits, then the
    /// charge strategies run in zone -> courier -> default precedence.
    pub fn evaluate(
        &self,
        cart: &CartSnapshot,
        address: &DeliveryAddress,
        courier: Option<&str>,
        order_time: NaiveDateTime,
    ) -> CodDecision {
        if !self.settings.enabled {
            return CodDecision::Unavailable {
                reason: CodDenial::Disabled,
            };
        }

        let subtotal = cart.subtotal();
        if let Some(reason) =
            rules::eligibility_denial(cart, address, subtotal, order_time, &self.settings.rules)
        {
            return CodDecision::Unavailable { reason };
        }

        match pricing::base_charge(
            subtotal,
            address,
            courier,
            &self.settings.pricing,
            &self.settings.courier_charges,
        ) {
            Ok(raw) => CodDecision::Available {
                charge: pricing::settle(raw),
            },
            Err(reason) => CodDecision::Unavailable { reason },
        }
    }
}

/// Outcome of one COD evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodDecision {
    Available { charge: f64 },
    Unavailable { reason: CodDenial },
}

impl CodDecision {
    pub fn is_available(&self) -> bool {
        matches!(self, CodDecision::Available { .. })
    }

    pub fn charge(&self) -> Option<f64> {
        match self {
            CodDecision::Available { charge } => Some(*charge),
            CodDecision::Unavailable { .. } => None,
        }
    }
}

/// Enumerates why COD was refused; `summary` feeds the shopper-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodDenial {
    Disabled,
    BelowMinimumOrderValue { minimum: f64, subtotal: f64 },
    AboveMaximumOrderValue { maximum: f64, subtotal: f64 },
    ExcludedCategory { category_id: String },
    ExcludedProduct { product_id: String },
    ExcludedPincode { pincode: String },
    ExcludedState { state: String },
    OutsideAllowedDays,
    OutsideAllowedHours { start: String, end: String },
    NoMatchingTier { subtotal: f64 },
}

impl CodDenial {
    pub fn summary(&self) -> String {
        match self {
            CodDenial::Disabled => "COD disabled".to_string(),
            CodDenial::BelowMinimumOrderValue { minimum, subtotal } => {
                format!("order value {subtotal:.2} below COD minimum {minimum:.2}")
            }
            CodDenial::AboveMaximumOrderValue { maximum, subtotal } => {
                format!("order value {subtotal:.2} exceeds COD maximum {maximum:.2}")
            }
            CodDenial::ExcludedCategory { category_id } => {
                format!("category {category_id} excluded from COD")
            }
            CodDenial::ExcludedProduct { product_id } => {
                format!("product {product_id} excluded from COD")
            }
            CodDenial::ExcludedPincode { pincode } => {
                format!("pincode {pincode} excluded from COD")
            }
            CodDenial::ExcludedState { state } => {
                format!("state {state} excluded from COD")
            }
            CodDenial::OutsideAllowedDays => "COD outside allowed days".to_string(),
            CodDenial::OutsideAllowedHours { start, end } => {
                format!("COD outside allowed hours {start}-{end}")
            }
            CodDenial::NoMatchingTier { subtotal } => {
                format!("no pricing tier matches order value {subtotal:.2}")
            }
        }
    }
}
