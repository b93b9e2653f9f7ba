use std::sync::Arc;

use tracing::{info, warn};

use super::signature;
use crate::core::{AppError, Result};
use crate::modules::gateways::services::{GatewayService, WebhookEvent};
use crate::modules::webhooks::models::WebhookEnvelope;

/// Authenticates inbound webhooks and interprets the payment outcome
///
/// Nothing is stored: an accepted webhook is logged and acknowledged.
#[derive(Clone)]
pub struct WebhookService {
    gateways: Arc<GatewayService>,
}

impl WebhookService {
    pub fn new(gateways: Arc<GatewayService>) -> Self {
        Self { gateways }
    }

    /// Verify the envelope's signature against the gateway's shared secret.
    ///
    /// Missing header, missing secret and mismatch all come back as `false`.
    pub fn verify(&self, envelope: &WebhookEnvelope) -> Result<bool> {
        let gateway = envelope.gateway_hint.ok_or_else(|| {
            AppError::unresolved_gateway("webhook does not name its gateway")
        })?;
        let client = self.gateways.get_gateway(gateway)?;

        let (Some(signature), Some(secret)) = (
            envelope.header(client.signature_header()),
            client.webhook_secret(),
        ) else {
            return Ok(false);
        };

        Ok(signature::verify(&envelope.raw_body, signature, secret))
    }

    /// Authenticate the webhook, then parse it into a payment event.
    ///
    /// The body is only parsed after the signature has been checked.
    pub fn handle(&self, envelope: &WebhookEnvelope) -> Result<WebhookEvent> {
        let gateway = envelope.gateway_hint.ok_or_else(|| {
            AppError::unresolved_gateway("webhook does not name its gateway")
        })?;

        if !self.verify(envelope)? {
            warn!(
                gateway = %gateway,
                body_len = envelope.raw_body.len(),
                "Rejected webhook with invalid signature"
            );
            return Err(AppError::signature_invalid(format!(
                "{} webhook signature verification failed",
                gateway
            )));
        }

        let event = self
            .gateways
            .get_gateway(gateway)?
            .parse_webhook(&envelope.raw_body)?;

        info!(
            gateway = %gateway,
            external_id = %event.external_id,
            reference = event.reference.as_deref().unwrap_or("-"),
            status = ?event.status,
            "Webhook accepted"
        );

        Ok(event)
    }
}
