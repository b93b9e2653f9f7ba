use crate::core::{Currency, Result};
use crate::modules::gateways::models::{
    Gateway, PaymentRequest, PaymentResponse, PaymentStatus, PaymentStatusReport,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment gateway trait for creating payments, looking up their status
/// and interpreting the gateway's webhooks
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment request and return the checkout URL
    async fn create_payment(&self, request: PaymentRequest) -> Result<PaymentResponse>;

    /// Look up the current status of a payment by the gateway's id
    async fn get_status(&self, external_id: &str) -> Result<PaymentStatusReport>;

    /// Interpret an already-authenticated webhook body
    fn parse_webhook(&self, payload: &[u8]) -> Result<WebhookEvent>;

    /// Header carrying the hex HMAC-SHA256 of the webhook body
    fn signature_header(&self) -> &'static str;

    /// Shared secret used to sign webhooks, if configured
    fn webhook_secret(&self) -> Option<&str>;

    fn gateway(&self) -> Gateway;

    fn supported_currencies(&self) -> Vec<Currency>;

    /// Get gateway name
    fn name(&self) -> &'static str {
        self.gateway().as_str()
    }

    /// Check if gateway supports a currency
    fn supports_currency(&self, currency: Currency) -> bool {
        self.supported_currencies().contains(&currency)
    }
}

/// Payment outcome carried by a verified webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub gateway: Gateway,

    /// Gateway-side payment id
    pub external_id: String,

    /// Merchant reference the payment was created with
    pub reference: Option<String>,

    pub status: PaymentStatus,

    /// Amount in major units, when the gateway reports it
    pub amount: Option<Decimal>,

    pub currency: Option<String>,

    /// Full webhook body (JSON)
    pub raw: serde_json::Value,
}
