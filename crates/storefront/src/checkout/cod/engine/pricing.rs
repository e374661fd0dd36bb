use super::super::domain::DeliveryAddress;
use super::super::settings::{CodPricing, CourierCharges, PricingStrategy};
use super::CodDenial;

/// Resolve the base charge: first matching location zone, then the selected
/// courier entry, then the document's default strategy. Exactly one strategy
/// contributes; a zone match replaces the default pricing entirely.
pub(crate) fn base_charge(
    subtotal: f64,
    address: &DeliveryAddress,
    courier: Option<&str>,
    pricing: &CodPricing,
    courier_charges: &CourierCharges,
) -> Result<f64, CodDenial> {
    if pricing.location_based.enabled {
        if let Some(zone) = pricing
            .location_based
            .zones
            .iter()
            .find(|zone| zone.covers(address))
        {
            return Ok(clamp(zone.charge, zone.min_charge, zone.max_charge));
        }
    }

    if courier_charges.enabled {
        if let Some(code) = courier {
            let entry = courier_charges
                .couriers
                .iter()
                .find(|courier| courier.enabled && courier.code == code);
            if let Some(entry) = entry {
                return Ok(clamp(
                    subtotal * entry.percentage / 100.0,
                    entry.min_charge,
                    entry.max_charge,
                ));
            }
        }
    }

    match pricing.strategy {
        PricingStrategy::Fixed => Ok(pricing.fixed_amount),
        PricingStrategy::Percentage | PricingStrategy::Dynamic => Ok(clamp(
            subtotal * pricing.percentage / 100.0,
            pricing.min_charge,
            pricing.max_charge,
        )),
        PricingStrategy::Tiered => pricing
            .tiers
            .iter()
            .find(|tier| tier.matches(subtotal))
            .map(|tier| tier.charge)
            .ok_or(CodDenial::NoMatchingTier { subtotal }),
    }
}

/// Clamp into `[min, max]`. A non-positive max means no upper bound, the same
/// activation convention `maxOrderValue` uses.
pub(crate) fn clamp(raw: f64, min: f64, max: f64) -> f64 {
    let mut value = raw;
    if value < min {
        value = min;
    }
    if max > 0.0 && value > max {
        value = max;
    }
    value
}

/// Final charge: two decimal places, never negative.
pub(crate) fn settle(raw: f64) -> f64 {
    let rounded = (raw * 100.0).round() / 100.0;
    if rounded < 0.0 {
        0.0
    } else {
        rounded
    }
}
