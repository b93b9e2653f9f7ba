pub mod chip;
pub mod gateway_service;
pub mod gateway_trait;
pub mod hitpay;
pub(crate) mod upstream;

pub use chip::ChipClient;
pub use gateway_service::{GatewayInfo, GatewayService};
pub use gateway_trait::{PaymentGateway, WebhookEvent};
pub use hitpay::HitpayClient;
