use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::Result;
use crate::modules::gateways::models::{Gateway, PaymentStatus};
use crate::modules::webhooks::models::WebhookEnvelope;
use crate::modules::webhooks::services::WebhookService;

/// Acknowledgement returned to the gateway
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    pub status: String,
    pub gateway: Gateway,
    pub external_id: String,
    pub payment_status: PaymentStatus,
}

/// Receive a payment gateway webhook
///
/// POST /api/{gateway}/webhook
///
/// The body is taken as raw bytes; it is parsed only after the signature
/// in `X-HitPay-Signature` (HitPay) or `X-Signature` (CHIP) checks out.
///
/// # Returns
/// * `200 OK` - Webhook authenticated and understood
/// * `400 Bad Request` - Authenticated body is not a recognizable event
/// * `401 Unauthorized` - Missing or invalid signature
pub async fn receive_webhook(
    req: HttpRequest,
    path: web::Path<Gateway>,
    body: web::Bytes,
    service: web::Data<WebhookService>,
) -> Result<HttpResponse> {
    let gateway = path.into_inner();

    info!(
        gateway = %gateway,
        body_len = body.len(),
        "Received webhook request"
    );

    let envelope = WebhookEnvelope::from_request(&req, body, Some(gateway));
    let event = service.handle(&envelope)?;

    Ok(HttpResponse::Ok().json(WebhookAck {
        status: "accepted".to_string(),
        gateway: event.gateway,
        external_id: event.external_id,
        payment_status: event.status,
    }))
}

/// Configure webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/{gateway}/webhook", web::post().to(receive_webhook));
}
