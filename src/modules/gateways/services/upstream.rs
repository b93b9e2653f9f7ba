//! Response handling shared by the gateway clients.

use crate::core::{AppError, Result};
use crate::modules::gateways::models::Gateway;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Maps a transport failure (connect, timeout, body read) to `GatewayUnreachable`.
pub(crate) fn send_error(gateway: Gateway, err: reqwest::Error) -> AppError {
    let reason = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };

    warn!(gateway = %gateway, reason, error = %err, "Gateway call failed");
    AppError::unreachable(gateway.as_str(), format!("{} ({})", reason, err))
}

/// Reads a gateway response body, turning non-2xx answers into
/// `GatewayRejected` with the upstream error payload attached.
pub(crate) async fn read_json(gateway: Gateway, response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| send_error(gateway, e))?;

    if !status.is_success() {
        let details = serde_json::from_str::<Value>(&body).unwrap_or_else(|_| {
            if body.trim().is_empty() {
                serde_json::json!({})
            } else {
                Value::String(body.clone())
            }
        });

        warn!(
            gateway = %gateway,
            status = status.as_u16(),
            details = %details,
            "Gateway rejected request"
        );

        return Err(AppError::GatewayRejected {
            gateway: gateway.as_str().to_string(),
            status: status.as_u16(),
            details,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| AppError::internal(format!("Failed to parse {} response: {}", gateway, e)))
}

/// Decodes a successful gateway payload into its typed shape.
pub(crate) fn decode<T: DeserializeOwned>(gateway: Gateway, raw: &Value) -> Result<T> {
    T::deserialize(raw)
        .map_err(|e| AppError::internal(format!("Unexpected {} response: {}", gateway, e)))
}

/// Joins a configured endpoint and a path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Builds `{base}/{collection}/{id}` for a single gateway resource.
///
/// The id arrives from query strings and paths, so it must stay one path
/// segment: gateway ids are `[A-Za-z0-9_-]` tokens and anything else is
/// rejected before a credentialed request is made.
pub(crate) fn resource_url(
    gateway: Gateway,
    base_url: &str,
    collection: &str,
    id: &str,
    trailing_slash: bool,
) -> Result<String> {
    let well_formed = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !well_formed {
        warn!(gateway = %gateway, id = %id, "Rejected malformed payment id");
        return Err(AppError::invalid_input(format!(
            "Invalid {} payment id",
            gateway
        )));
    }

    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Configuration(format!("Invalid {} endpoint: {}", gateway, e)))?;
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            AppError::Configuration(format!("Invalid {} endpoint: not a base URL", gateway))
        })?;
        segments.pop_if_empty().push(collection).push(id);
        if trailing_slash {
            segments.push("");
        }
    }

    Ok(url.to_string())
}
