pub mod gateways;
pub mod health;
pub mod routing;
pub mod webhooks;

use std::sync::Arc;

use actix_web::web;

use crate::config::Config;
use crate::core::Result;
use crate::middleware::{json_config, query_config};
use gateways::GatewayService;
use webhooks::WebhookService;

/// Read-only services shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub gateways: Arc<GatewayService>,
    pub webhooks: Arc<WebhookService>,
}

impl AppState {
    pub fn new(gateways: GatewayService) -> Self {
        let gateways = Arc::new(gateways);
        let webhooks = Arc::new(WebhookService::new(gateways.clone()));
        Self { gateways, webhooks }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(GatewayService::from_config(config)?))
    }
}

/// Register shared data, extractor configs and every API route.
///
/// Static assets are mounted separately by the binary, after these routes.
pub fn configure(state: AppState) -> impl Fn(&mut web::ServiceConfig) + Clone + Send + 'static {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(state.gateways.clone()))
            .app_data(web::Data::from(state.webhooks.clone()))
            .app_data(json_config())
            .app_data(query_config())
            .configure(health::configure)
            .configure(gateways::configure)
            .configure(webhooks::configure)
            .configure(routing::configure);
    }
}
