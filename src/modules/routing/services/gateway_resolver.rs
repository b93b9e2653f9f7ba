//! Attributes unlabeled callbacks and webhooks to a gateway.
//!
//! Pure functions over query parameters, no HTTP context needed.

use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::modules::gateways::models::Gateway;

/// Query parameters that can identify a gateway
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayHints {
    pub gateway: Option<String>,
    /// HitPay sends the shopper back with `reference`
    pub reference: Option<String>,
    /// CHIP sends the shopper back with the purchase `id`
    pub id: Option<String>,
}

impl GatewayHints {
    pub fn explicit(gateway: &str) -> Self {
        Self {
            gateway: Some(gateway.to_string()),
            ..Self::default()
        }
    }
}

/// Resolve a gateway, first match wins:
/// 1. a valid explicit `gateway` parameter
/// 2. `reference` containing "hitpay", then `id` containing "chip"
/// 3. otherwise `UnresolvedGateway`; no default is guessed
pub fn resolve_gateway(hints: &GatewayHints) -> Result<Gateway> {
    if let Some(gateway) = explicit_gateway(hints) {
        return Ok(gateway);
    }

    // TODO: drop the substring fallback once both gateways are configured
    // with `?gateway=` on their return URLs.
    infer_from_shape(hints).ok_or_else(|| {
        AppError::unresolved_gateway(
            "pass ?gateway=hitpay|chip, a HitPay reference or a CHIP purchase id",
        )
    })
}

/// Resolve from the explicit `gateway` parameter only
pub fn resolve_explicit(hints: &GatewayHints) -> Result<Gateway> {
    explicit_gateway(hints).ok_or_else(|| {
        AppError::unresolved_gateway(format!(
            "invalid payment gateway '{}'",
            hints.gateway.as_deref().unwrap_or("")
        ))
    })
}

fn explicit_gateway(hints: &GatewayHints) -> Option<Gateway> {
    hints.gateway.as_deref().and_then(|g| g.parse().ok())
}

fn infer_from_shape(hints: &GatewayHints) -> Option<Gateway> {
    let contains = |value: &Option<String>, marker: &str| {
        value.as_deref().is_some_and(|v| v.contains(marker))
    };

    if contains(&hints.reference, Gateway::Hitpay.as_str()) {
        Some(Gateway::Hitpay)
    } else if contains(&hints.id, Gateway::Chip.as_str()) {
        Some(Gateway::Chip)
    } else {
        None
    }
}
