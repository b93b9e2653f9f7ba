pub mod webhook_envelope;

pub use webhook_envelope::WebhookEnvelope;
