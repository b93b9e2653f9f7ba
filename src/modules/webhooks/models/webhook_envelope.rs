use std::collections::HashMap;

use actix_web::web::Bytes;
use actix_web::HttpRequest;

use crate::modules::gateways::models::Gateway;

/// An inbound webhook exactly as received
///
/// The body is kept as the raw bytes off the wire so the signature can be
/// checked before anything parses it.
#[derive(Debug, Clone)]
pub struct WebhookEnvelope {
    pub raw_body: Bytes,
    /// Header names are lower-cased
    pub headers: HashMap<String, String>,
    pub gateway_hint: Option<Gateway>,
}

impl WebhookEnvelope {
    pub fn new(raw_body: Bytes, gateway_hint: Option<Gateway>) -> Self {
        Self {
            raw_body,
            headers: HashMap::new(),
            gateway_hint,
        }
    }

    /// Capture body and headers from an actix request
    pub fn from_request(req: &HttpRequest, raw_body: Bytes, gateway_hint: Option<Gateway>) -> Self {
        let headers = req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
            })
            .collect();

        Self {
            raw_body,
            headers,
            gateway_hint,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
