use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::modules::gateways::services::{GatewayInfo, GatewayService};

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub gateways: Vec<GatewayInfo>,
}

/// GET /health - Liveness probe
/// Returns 200 if the application can respond to requests; gateways are
/// listed from configuration, not probed.
pub async fn health_check(service: web::Data<GatewayService>) -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        gateways: service.list_gateways(),
    };

    HttpResponse::Ok().json(response)
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
