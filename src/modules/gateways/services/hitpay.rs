use super::gateway_trait::{PaymentGateway, WebhookEvent};
use super::upstream;
use crate::config::{HitpayConfig, RedirectConfig, Secret};
use crate::core::{AppError, Currency, Result};
use crate::modules::gateways::models::{
    Gateway, PaymentRequest, PaymentResponse, PaymentStatus, PaymentStatusReport,
};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// HitPay payment gateway client
///
/// Payment requests are flat JSON documents authenticated with the
/// `X-BUSINESS-API-KEY` header; amounts are decimal strings.
/// API Documentation: https://docs.hitpayapp.com
pub struct HitpayClient {
    client: Client,
    api_key: Secret,
    base_url: String,
    webhook_secret: Option<Secret>,
    redirects: RedirectConfig,
}

impl HitpayClient {
    pub fn new(config: &HitpayConfig, redirects: &RedirectConfig, client: Client) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.clone(),
            webhook_secret: config.webhook_secret.clone(),
            redirects: redirects.clone(),
        }
    }

    pub(crate) fn payment_request_body(&self, request: &PaymentRequest) -> HitpayPaymentRequest {
        HitpayPaymentRequest {
            amount: request.currency.format_amount(request.amount),
            currency: request.currency,
            reference_number: request.reference.clone(),
            redirect_url: self.redirects.success_url.clone(),
            webhook: self.redirects.public_webhook_url().map(String::from),
            email: request.email.clone(),
            name: request.name.clone(),
            phone: request.phone.clone(),
            purpose: request.description.clone(),
        }
    }

    fn map_status(status: &str) -> PaymentStatus {
        match status.to_ascii_lowercase().as_str() {
            "completed" | "succeeded" => PaymentStatus::Completed,
            "failed" | "canceled" | "cancelled" => PaymentStatus::Failed,
            "expired" => PaymentStatus::Expired,
            _ => PaymentStatus::Pending,
        }
    }
}

#[async_trait]
impl PaymentGateway for HitpayClient {
    async fn create_payment(&self, request: PaymentRequest) -> Result<PaymentResponse> {
        request.validate().map_err(AppError::InvalidInput)?;

        let body = self.payment_request_body(&request);
        let url = upstream::endpoint(&self.base_url, "payment-requests");

        info!(
            gateway = "hitpay",
            reference = %request.reference,
            amount = %body.amount,
            currency = %request.currency,
            webhook = body.webhook.is_some(),
            "Creating HitPay payment request"
        );

        let response = self
            .client
            .post(&url)
            .header("X-BUSINESS-API-KEY", self.api_key.expose())
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&body)
            .send()
            .await
            .map_err(|e| upstream::send_error(Gateway::Hitpay, e))?;

        let raw = upstream::read_json(Gateway::Hitpay, response).await?;
        let created: HitpayPaymentRequestResponse = upstream::decode(Gateway::Hitpay, &raw)?;

        Ok(PaymentResponse {
            gateway_reference: created.id,
            checkout_url: created.url.unwrap_or_default(),
            status: created
                .status
                .as_deref()
                .map(Self::map_status)
                .unwrap_or(PaymentStatus::Pending),
            raw,
        })
    }

    async fn get_status(&self, external_id: &str) -> Result<PaymentStatusReport> {
        let url = upstream::resource_url(
            Gateway::Hitpay,
            &self.base_url,
            "payment-requests",
            external_id,
            false,
        )?;

        let response = self
            .client
            .get(&url)
            .header("X-BUSINESS-API-KEY", self.api_key.expose())
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| upstream::send_error(Gateway::Hitpay, e))?;

        let raw = upstream::read_json(Gateway::Hitpay, response).await?;
        let found: HitpayPaymentRequestResponse = upstream::decode(Gateway::Hitpay, &raw)?;

        Ok(PaymentStatusReport {
            gateway: Gateway::Hitpay,
            external_id: found.id,
            status: found
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
            .map_err(|e| AppError::invalid_input(format!("Invalid HitPay webhook: {}", e)))?;
        let webhook: HitpayWebhook = HitpayWebhook::deserialize(&raw)
            .map_err(|e| AppError::invalid_input(format!("Invalid HitPay webhook: {}", e)))?;

        Ok(WebhookEvent {
            gateway: Gateway::Hitpay,
            external_id: webhook.id,
            reference: webhook.reference_number,
            status: Self::map_status(&webhook.status),
            amount: webhook.amount,
            currency: webhook.currency,
            raw,
        })
    }

    fn signature_header(&self) -> &'static str {
        "x-hitpay-signature"
    }

    fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_ref().map(Secret::expose)
    }

    fn gateway(&self) -> Gateway {
        Gateway::Hitpay
    }

    fn supported_currencies(&self) -> Vec<Currency> {
        vec![Currency::SGD, Currency::MYR, Currency::USD, Currency::IDR]
    }
}

// HitPay API request/response structures

#[derive(Debug, Serialize)]
pub(crate) struct HitpayPaymentRequest {
    amount: String,
    currency: Currency,
    reference_number: String,
    redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HitpayPaymentRequestResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HitpayWebhook {
    #[serde(alias = "payment_request_id")]
    id: String,
    status: String,
    #[serde(default)]
    reference_number: Option<String>,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    currency: Option<String>,
}
