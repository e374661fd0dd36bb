use serde::{Deserialize, Serialize};

/// One cart line as captured at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Ordered cart snapshot built once per checkout attempt.
///
/// The subtotal is always recomputed from the lines; client-supplied totals
/// are never trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn subtotal(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| f64::from(line.quantity) * line.unit_price)
            .sum()
    }
}

/// Delivery address selected by the shopper before the decision is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryAddress {
    pub pincode: String,
    pub state: String,
    pub city: String,
}
