use chrono::{Datelike, NaiveDateTime};

use super::super::domain::{CartSnapshot, DeliveryAddress};
use super::super::settings::{CodRules, TimeRestrictions};
use super::CodDenial;

/// Apply the eligibility gates in their fixed order; the first hit names the
/// entity that blocked the order.
pub(crate) fn eligibility_denial(
    cart: &CartSnapshot,
    address: &DeliveryAddress,
    subtotal: f64,
    order_time: NaiveDateTime,
    rules: &CodRules,
) -> Option<CodDenial> {
    if subtotal < rules.min_order_value {
        return Some(CodDenial::BelowMinimumOrderValue {
            minimum: rules.min_order_value,
            subtotal,
        });
    }
    if rules.max_order_value > 0.0 && subtotal > rules.max_order_value {
        return Some(CodDenial::AboveMaximumOrderValue {
            maximum: rules.max_order_value,
            subtotal,
        });
    }

    for line in &cart.lines {
        if let Some(category_id) = &line.category_id {
            if rules.excluded_categories.iter().any(|c| c == category_id) {
                return Some(CodDenial::ExcludedCategory {
                    category_id: category_id.clone(),
                });
            }
        }
    }
    for line in &cart.lines {
        if rules.excluded_products.iter().any(|p| p == &line.product_id) {
            return Some(CodDenial::ExcludedProduct {
                product_id: line.product_id.clone(),
            });
        }
    }
    if rules.excluded_pincodes.iter().any(|p| p == &address.pincode) {
        return Some(CodDenial::ExcludedPincode {
            pincode: address.pincode.clone(),
        });
    }
    if rules
        .excluded_states
        .iter()
        .any(|s| s.eq_ignore_ascii_case(&address.state))
    {
        return Some(CodDenial::ExcludedState {
            state: address.state.clone(),
        });
    }

    time_denial(&rules.time_restrictions, order_time)
}

fn time_denial(restrictions: &TimeRestrictions, order_time: NaiveDateTime) -> Option<CodDenial> {
    if !restrictions.enabled {
        return None;
    }

    if !restrictions.days_of_week.is_empty() {
        let weekday = order_time.weekday().num_days_from_sunday() as u8;
        if !restrictions.days_of_week.contains(&weekday) {
            return Some(CodDenial::OutsideAllowedDays);
        }
    }

    // Zero-padded 24h clock strings order lexicographically. Blank bounds on
    // a half-edited document fall back to the full day.
    let start = effective_bound(&restrictions.start_time, "00:00");
    let end = effective_bound(&restrictions.end_time, "23:59");
    let now = order_time.format("%H:%M").to_string();
    if now < start || now > end {
        return Some(CodDenial::OutsideAllowedHours { start, end });
    }

    None
}

fn effective_bound(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
