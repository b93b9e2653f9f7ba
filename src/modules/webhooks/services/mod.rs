pub mod signature;
pub mod webhook_service;

pub use webhook_service::WebhookService;
