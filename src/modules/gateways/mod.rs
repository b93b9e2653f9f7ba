pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{Gateway, PaymentRequest, PaymentResponse, PaymentStatus, PaymentStatusReport};
pub use services::{
    ChipClient, GatewayInfo, GatewayService, HitpayClient, PaymentGateway, WebhookEvent,
};
