//! payrelay: payment gateway relay library
//!
//! Translates storefront payment requests into HitPay and CHIP API calls,
//! authenticates the webhooks those gateways send back, and routes
//! unlabeled callbacks to the right gateway.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::gateways;
pub use modules::routing;
pub use modules::webhooks;
pub use modules::{configure, AppState};
