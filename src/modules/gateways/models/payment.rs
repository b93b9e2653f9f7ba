use super::gateway::Gateway;
use crate::core::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Normalized payment request handed to a gateway client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in major currency units
    pub amount: Decimal,

    pub currency: Currency,

    /// Unique per attempt; doubles as the idempotency key where supported
    pub reference: String,

    /// Payer information (optional)
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,

    /// Line description shown on the checkout page
    pub description: Option<String>,
}

impl PaymentRequest {
    pub fn new(amount: Decimal, currency: Currency, reference: impl Into<String>) -> Self {
        Self {
            amount,
            currency,
            reference: reference.into(),
            email: None,
            name: None,
            phone: None,
            description: None,
        }
    }

    /// Generates a fresh order reference (`ORD-<uuid>`)
    pub fn generate_reference() -> String {
        format!("ORD-{}", Uuid::new_v4())
    }

    /// Checks the request invariants: positive amount, non-empty reference
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= Decimal::ZERO {
            return Err(format!("{} amount must be greater than 0", self.currency));
        }
        // Anything below half a minor unit would be charged as zero
        if self.currency.to_minor_units(self.amount)? <= 0 {
            return Err(format!(
                "{} amount {} rounds to zero",
                self.currency, self.amount
            ));
        }
        if self.reference.trim().is_empty() {
            return Err("reference must not be empty".to_string());
        }
        Ok(())
    }
}

/// Payment response from gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Gateway transaction reference
    pub gateway_reference: String,

    /// Hosted checkout page the shopper is redirected to
    pub checkout_url: String,

    pub status: PaymentStatus,

    /// Full gateway response
    pub raw: serde_json::Value,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Expired,
}

/// Result of a status lookup against a gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusReport {
    pub gateway: Gateway,
    pub external_id: String,
    pub status: PaymentStatus,
    pub checked_at: DateTime<Utc>,
    pub raw: serde_json::Value,
}
