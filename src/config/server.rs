use crate::core::{AppError, Result};
use std::env;

/// Server configuration for HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the storefront's static assets
    pub static_dir: String,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            static_dir: "public".to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid SERVER_PORT".to_string()))?;

        let mut config = Self::new(
            env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        );
        if let Ok(dir) = env::var("STATIC_DIR") {
            config.static_dir = dir;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
