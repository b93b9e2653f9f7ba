use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tracing::{error, info};

use super::chip::ChipClient;
use super::gateway_trait::PaymentGateway;
use super::hitpay::HitpayClient;
use crate::config::Config;
use crate::core::{AppError, Currency, Result};
use crate::modules::gateways::models::{
    Gateway, PaymentRequest, PaymentResponse, PaymentStatusReport,
};

/// Service for managing and routing to payment gateways
pub struct GatewayService {
    gateways: HashMap<Gateway, Arc<dyn PaymentGateway>>,
}

impl GatewayService {
    /// Create an empty GatewayService; gateways are registered explicitly
    pub fn new() -> Self {
        Self {
            gateways: HashMap::new(),
        }
    }

    /// Build the service with every configured gateway registered.
    ///
    /// All clients share one HTTP client carrying the outbound timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let mut service = Self::new();
        service.register_gateway(Arc::new(HitpayClient::new(
            &config.hitpay,
            &config.redirects,
            client.clone(),
        )));
        service.register_gateway(Arc::new(ChipClient::new(
            &config.chip,
            &config.redirects,
            client,
        )));

        Ok(service)
    }

    /// Register a gateway
    pub fn register_gateway(&mut self, gateway: Arc<dyn PaymentGateway>) {
        self.gateways.insert(gateway.gateway(), gateway);
    }

    /// Get a gateway client
    pub fn get_gateway(&self, gateway: Gateway) -> Result<Arc<dyn PaymentGateway>> {
        self.gateways
            .get(&gateway)
            .cloned()
            .ok_or_else(|| AppError::Configuration(format!("Gateway '{}' is not configured", gateway)))
    }

    /// Create a payment using the specified gateway
    pub async fn create_payment(
        &self,
        gateway: Gateway,
        request: PaymentRequest,
    ) -> Result<PaymentResponse> {
        info!(
            gateway = %gateway,
            reference = %request.reference,
            amount = %request.amount,
            currency = %request.currency,
            "Creating payment with gateway"
        );

        let client = self.get_gateway(gateway)?;

        match client.create_payment(request).await {
            Ok(response) => {
                info!(
                    gateway = %gateway,
                    gateway_reference = %response.gateway_reference,
                    "Payment created successfully"
                );
                Ok(response)
            }
            Err(e) => {
                error!(gateway = %gateway, error = %e, "Failed to create payment");
                Err(e)
            }
        }
    }

    /// Look up a payment's status at the specified gateway
    pub async fn get_status(&self, gateway: Gateway, external_id: &str) -> Result<PaymentStatusReport> {
        if external_id.trim().is_empty() {
            return Err(AppError::invalid_input("payment id must not be empty"));
        }

        let report = self.get_gateway(gateway)?.get_status(external_id).await?;

        info!(
            gateway = %gateway,
            external_id = %report.external_id,
            status = ?report.status,
            "Payment status retrieved"
        );

        Ok(report)
    }

    /// List all available gateways
    pub fn list_gateways(&self) -> Vec<GatewayInfo> {
        let mut gateways: Vec<GatewayInfo> = self
            .gateways
            .values()
            .map(|gateway| GatewayInfo {
                name: gateway.name().to_string(),
                supported_currencies: gateway.supported_currencies(),
                webhook_verification: gateway.webhook_secret().is_some(),
            })
            .collect();
        gateways.sort_by(|a, b| a.name.cmp(&b.name));
        gateways
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new()
    }
}

/// Gateway information for listing
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GatewayInfo {
    pub name: String,
    pub supported_currencies: Vec<Currency>,
    /// Whether a webhook secret is configured
    pub webhook_verification: bool,
}
