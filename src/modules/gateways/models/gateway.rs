use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The payment gateways the relay speaks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gateway {
    Hitpay,
    Chip,
}

impl Gateway {
    /// Identifier used in URLs and the `gateway` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Gateway::Hitpay => "hitpay",
            Gateway::Chip => "chip",
        }
    }

    /// Base path of the gateway-specific API scope
    pub fn api_path(&self) -> String {
        format!("/api/{}", self.as_str())
    }

    pub fn callback_path(&self) -> String {
        format!("{}/callback", self.api_path())
    }

    pub fn webhook_path(&self) -> String {
        format!("{}/webhook", self.api_path())
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gateway {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hitpay" => Ok(Gateway::Hitpay),
            "chip" => Ok(Gateway::Chip),
            _ => Err(format!("Unsupported gateway: {}", s)),
        }
    }
}
