//! Storefront checkout services.
//!
//! Hosts the cash-on-delivery policy engine consumed by the checkout flow, the
//! admin-edited settings document it reads, and the HTTP router that preserves
//! the storefront's existing wire contract.

pub mod checkout;
pub mod config;
pub mod error;
pub mod telemetry;
