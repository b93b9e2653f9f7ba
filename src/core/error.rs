use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::Value;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Client-correctable input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream gateway answered with a non-success status
    #[error("{gateway} rejected request (HTTP {status})")]
    GatewayRejected {
        gateway: String,
        status: u16,
        details: Value,
    },

    /// Upstream gateway could not be reached (connect failure, timeout)
    #[error("{gateway} unreachable: {message}")]
    GatewayUnreachable { gateway: String, message: String },

    /// Webhook authentication failed
    #[error("Invalid signature: {0}")]
    SignatureInvalid(String),

    /// Callback or webhook could not be attributed to a gateway
    #[error("Unable to determine payment gateway: {0}")]
    UnresolvedGateway(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let mut error = serde_json::json!({
            "message": self.to_string(),
            "code": status_code.as_u16(),
        });

        if let AppError::GatewayRejected { details, .. } = self {
            error["details"] = details.clone();
        }

        HttpResponse::build(status_code).json(serde_json::json!({ "error": error }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::GatewayRejected { .. } => StatusCode::BAD_GATEWAY,
            AppError::GatewayUnreachable { .. } => StatusCode::BAD_GATEWAY,
            AppError::SignatureInvalid(_) => StatusCode::UNAUTHORIZED,
            AppError::UnresolvedGateway(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn signature_invalid(msg: impl Into<String>) -> Self {
        AppError::SignatureInvalid(msg.into())
    }

    pub fn unresolved_gateway(msg: impl Into<String>) -> Self {
        AppError::UnresolvedGateway(msg.into())
    }

    pub fn unreachable(gateway: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::GatewayUnreachable {
            gateway: gateway.into(),
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
