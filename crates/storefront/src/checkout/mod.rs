//! Checkout-facing subsystems.

pub mod cod;
