use crate::core::{AppError, Result};
use reqwest::Url;
use std::env;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
///
/// Loaded once at startup and handed to each component by value; nothing
/// mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub http: HttpClientConfig,
    pub hitpay: HitpayConfig,
    pub chip: ChipConfig,
    pub redirects: RedirectConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    /// `json` switches the log output to JSON lines
    pub log_format: String,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout_secs: u64,
}

impl HttpClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Clone)]
pub struct HitpayConfig {
    pub api_key: Secret,
    pub api_endpoint: String,
    pub webhook_secret: Option<Secret>,
}

#[derive(Debug, Clone)]
pub struct ChipConfig {
    pub secret_key: Secret,
    pub brand_id: String,
    pub api_endpoint: String,
    pub webhook_secret: Option<Secret>,
}

/// Where gateways send the shopper and the server-to-server notifications
#[derive(Debug, Clone)]
pub struct RedirectConfig {
    pub success_url: String,
    pub failure_url: String,
    /// Server-to-server callback (CHIP `success_callback`)
    pub callback_url: Option<String>,
    /// Webhook target registered with HitPay
    pub webhook_url: Option<String>,
}

impl RedirectConfig {
    /// Callback URL to hand to a gateway, or `None` when it points at a
    /// loopback host (gateways refuse to call those).
    pub fn public_callback_url(&self) -> Option<&str> {
        self.callback_url
            .as_deref()
            .or(self.webhook_url.as_deref())
            .filter(|url| !is_loopback_url(url))
    }

    /// Webhook URL to hand to a gateway, loopback targets omitted.
    pub fn public_webhook_url(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .filter(|url| !is_loopback_url(url))
    }
}

/// A credential that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Returns true when the URL targets localhost or a loopback address.
/// Unparseable URLs are treated as loopback so they are never sent upstream.
pub fn is_loopback_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return true;
    };

    let Some(host) = parsed.host_str() else {
        return true;
    };

    let host = host.trim_start_matches('[').trim_end_matches(']');
    match host.parse::<IpAddr>() {
        Ok(ip) => ip.is_loopback(),
        Err(_) => host.eq_ignore_ascii_case("localhost") || host.ends_with(".localhost"),
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AppError::Configuration(format!("{} not set", name)))
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let redirect_url = optional_var("REDIRECT_URL");
        let success_url = optional_var("REDIRECT_URL_SUCCESS")
            .or_else(|| redirect_url.clone())
            .ok_or_else(|| {
                AppError::Configuration("REDIRECT_URL or REDIRECT_URL_SUCCESS not set".to_string())
            })?;
        let failure_url = optional_var("REDIRECT_URL_FAILURE")
            .or(redirect_url)
            .unwrap_or_else(|| success_url.clone());

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            server: ServerConfig::from_env()?,
            http: HttpClientConfig {
                timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid HTTP_TIMEOUT_SECS".to_string())
                    })?,
            },
            hitpay: HitpayConfig {
                api_key: Secret::new(required_var("HITPAY_API_KEY")?),
                api_endpoint: env::var("HITPAY_API_ENDPOINT")
                    .unwrap_or_else(|_| "https://api.sandbox.hit-pay.com/v1".to_string()),
                webhook_secret: optional_var("HITPAY_WEBHOOK_SECRET").map(Secret::new),
            },
            chip: ChipConfig {
                secret_key: Secret::new(required_var("CHIP_SECRET_KEY")?),
                brand_id: required_var("CHIP_BRAND_ID")?,
                api_endpoint: env::var("CHIP_API_ENDPOINT")
                    .unwrap_or_else(|_| "https://gate.chip-in.asia/api/v1".to_string()),
                webhook_secret: optional_var("CHIP_WEBHOOK_SECRET").map(Secret::new),
            },
            redirects: RedirectConfig {
                success_url,
                failure_url,
                callback_url: optional_var("CALLBACK_URL"),
                webhook_url: optional_var("WEBHOOK_URL"),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "HTTP timeout must be greater than 0".to_string(),
            ));
        }

        for (name, url) in [
            ("HITPAY_API_ENDPOINT", self.hitpay.api_endpoint.as_str()),
            ("CHIP_API_ENDPOINT", self.chip.api_endpoint.as_str()),
            ("REDIRECT_URL_SUCCESS", self.redirects.success_url.as_str()),
            ("REDIRECT_URL_FAILURE", self.redirects.failure_url.as_str()),
        ] {
            Url::parse(url)
                .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", name, e)))?;
        }

        Ok(())
    }
}
