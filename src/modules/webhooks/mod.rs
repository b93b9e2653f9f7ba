pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::{configure, WebhookAck};
pub use models::WebhookEnvelope;
pub use services::{signature, WebhookService};
