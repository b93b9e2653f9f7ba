use super::gateway_trait::{PaymentGateway, WebhookEvent};
use super::upstream;
use crate::config::{ChipConfig, RedirectConfig, Secret};
use crate::core::{AppError, Currency, Result};
use crate::modules::gateways::models::{
    Gateway, PaymentRequest, PaymentResponse, PaymentStatus, PaymentStatusReport,
};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// CHIP (gate.chip-in.asia) payment gateway client
///
/// Purchases are created with a bearer secret key; amounts travel in minor
/// units inside a `purchase` wrapper. CHIP settles in MYR only.
/// API Documentation: https://docs.chip-in.asia
pub struct ChipClient {
    client: Client,
    secret_key: Secret,
    brand_id: String,
    base_url: String,
    webhook_secret: Option<Secret>,
    redirects: RedirectConfig,
}

impl ChipClient {
    /// Create a new CHIP client
    ///
    /// # Arguments
    /// * `config` - CHIP credentials and endpoint
    /// * `redirects` - shopper redirect and server callback URLs
    /// * `client` - shared HTTP client (carries the outbound timeout)
    pub fn new(config: &ChipConfig, redirects: &RedirectConfig, client: Client) -> Self {
        Self {
            client,
            secret_key: config.secret_key.clone(),
            brand_id: config.brand_id.clone(),
            base_url: config.api_endpoint.clone(),
            webhook_secret: config.webhook_secret.clone(),
            redirects: redirects.clone(),
        }
    }

    /// Build the purchase body for a normalized request
    pub(crate) fn purchase_body(&self, request: &PaymentRequest) -> Result<ChipPurchaseRequest> {
        let price = request
            .currency
            .to_minor_units(request.amount)
            .map_err(AppError::InvalidInput)?;

        let client = request.email.as_ref().map(|email| ChipClientDetails {
            email: email.clone(),
            full_name: request.name.clone(),
            phone_number: request.phone.clone(),
        });

        Ok(ChipPurchaseRequest {
            brand_id: self.brand_id.clone(),
            reference: request.reference.clone(),
            success_redirect: self.redirects.success_url.clone(),
            failure_redirect: self.redirects.failure_url.clone(),
            success_callback: self.redirects.public_callback_url().map(String::from),
            purchase: ChipPurchaseDetails {
                currency: request.currency,
                products: vec![ChipProduct {
                    name: request
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("Order {}", request.reference)),
                    price,
                    quantity: 1,
                }],
            },
            client,
        })
    }

    fn map_status(status: &str) -> PaymentStatus {
        match status {
            "paid" | "cleared" | "settled" => PaymentStatus::Completed,
            "error" | "cancelled" | "blocked" => PaymentStatus::Failed,
            "expired" | "overdue" => PaymentStatus::Expired,
            _ => PaymentStatus::Pending,
        }
    }
}

#[async_trait]
impl PaymentGateway for ChipClient {
    async fn create_payment(&self, request: PaymentRequest) -> Result<PaymentResponse> {
        if !self.supports_currency(request.currency) {
            return Err(AppError::invalid_input(format!(
                "CHIP does not support {}",
                request.currency
            )));
        }
        request.validate().map_err(AppError::InvalidInput)?;

        let body = self.purchase_body(&request)?;
        let url = upstream::endpoint(&self.base_url, "purchases/");

        info!(
            gateway = "chip",
            reference = %request.reference,
            amount = %request.amount,
            price_minor = body.purchase.products[0].price,
            callback = body.success_callback.is_some(),
            "Creating CHIP purchase"
        );

        // The reference doubles as idempotency key so retried submissions
        // cannot create a second purchase.
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.secret_key.expose())
            .header("Idempotency-Key", &request.reference)
            .json(&body)
            .send()
            .await
            .map_err(|e| upstream::send_error(Gateway::Chip, e))?;

        let raw = upstream::read_json(Gateway::Chip, response).await?;
        let purchase: ChipPurchase = upstream::decode(Gateway::Chip, &raw)?;

        let checkout_url = purchase
            .checkout_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::internal("CHIP response is missing checkout_url"))?;

        Ok(PaymentResponse {
            gateway_reference: purchase.id,
            checkout_url,
            status: purchase
                .status
                .as_deref()
                .map(Self::map_status)
                .unwrap_or(PaymentStatus::Pending),
            raw,
        })
    }

    async fn get_status(&self, external_id: &str) -> Result<PaymentStatusReport> {
        let url = upstream::resource_url(
            Gateway::Chip,
            &self.base_url,
            "purchases",
            external_id,
            true,
        )?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.secret_key.expose())
            .send()
            .await
            .map_err(|e| upstream::send_error(Gateway::Chip, e))?;

        let raw = upstream::read_json(Gateway::Chip, response).await?;
        let purchase: ChipPurchase = upstream::decode(Gateway::Chip, &raw)?;

        Ok(PaymentStatusReport {
            gateway: Gateway::Chip,
            external_id: purchase.id,
            status: purchase
                .status
                .as_deref()
                .map(Self::map_status)
                .unwrap_or(PaymentStatus::Pending),
            checked_at: chrono::Utc::now(),
            raw,
        })
    }

    fn parse_webhook(&self, payload: &[u8]) -> Result<WebhookEvent> {
        let raw: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| AppError::invalid_input(format!("Invalid CHIP webhook: {}", e)))?;
        let purchase: ChipPurchase = ChipPurchase::deserialize(&raw)
            .map_err(|e| AppError::invalid_input(format!("Invalid CHIP webhook: {}", e)))?;

        let totals = purchase.purchase.unwrap_or_default();

        Ok(WebhookEvent {
            gateway: Gateway::Chip,
            external_id: purchase.id,
            reference: purchase.reference,
            status: purchase
                .status
                .as_deref()
                .map(Self::map_status)
                .unwrap_or(PaymentStatus::Pending),
            // CHIP reports totals in minor units
            amount: totals.total.map(|minor| Decimal::new(minor, 2)),
            currency: totals.currency,
            raw,
        })
    }

    fn signature_header(&self) -> &'static str {
        "x-signature"
    }

    fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_ref().map(Secret::expose)
    }

    fn gateway(&self) -> Gateway {
        Gateway::Chip
    }

    fn supported_currencies(&self) -> Vec<Currency> {
        vec![Currency::MYR]
    }
}

// CHIP API request/response structures

#[derive(Debug, Serialize)]
pub(crate) struct ChipPurchaseRequest {
    brand_id: String,
    reference: String,
    success_redirect: String,
    failure_redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    success_callback: Option<String>,
    purchase: ChipPurchaseDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    client: Option<ChipClientDetails>,
}

#[derive(Debug, Serialize)]
struct ChipPurchaseDetails {
    currency: Currency,
    products: Vec<ChipProduct>,
}

#[derive(Debug, Serialize)]
struct ChipProduct {
    name: String,
    price: i64,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct ChipClientDetails {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChipPurchase {
    id: String,
    #[serde(default)]
    checkout_url: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    purchase: Option<ChipPurchaseTotals>,
}

#[derive(Debug, Default, Deserialize)]
struct ChipPurchaseTotals {
    #[serde(default)]
    total: Option<i64>,
    #[serde(default)]
    currency: Option<String>,
}
