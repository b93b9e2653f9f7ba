use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, Error, HttpMessage, HttpRequest,
};

use super::request_id::RequestIdValue;
use crate::core::AppError;

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestIdValue>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Converts malformed JSON bodies into the `InvalidInput` error shape
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(
        request_id = %request_id(req),
        path = %req.path(),
        error = %err,
        "Rejected malformed JSON body"
    );
    AppError::invalid_input(format!("Malformed JSON body: {}", err)).into()
}

/// Converts unparseable query strings into the `InvalidInput` error shape
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(
        request_id = %request_id(req),
        path = %req.path(),
        error = %err,
        "Rejected malformed query string"
    );
    AppError::invalid_input(format!("Malformed query string: {}", err)).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
