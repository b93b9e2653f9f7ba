use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::core::Result;
use crate::modules::routing::services::{resolve_explicit, resolve_gateway, GatewayHints};

/// 307 keeps the method and body, so a redirected webhook POST arrives
/// intact at the gateway-specific endpoint.
fn temporary_redirect(location: String) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /payment/callback
///
/// Generic return URL shared by both gateways; forwards the original query
/// string untouched to `/api/{gateway}/callback`.
pub async fn dispatch_callback(
    req: HttpRequest,
    hints: web::Query<GatewayHints>,
) -> Result<HttpResponse> {
    let gateway = resolve_gateway(&hints)?;

    let mut location = gateway.callback_path();
    if !req.query_string().is_empty() {
        location.push('?');
        location.push_str(req.query_string());
    }

    info!(gateway = %gateway, location = %location, "Dispatching payment callback");
    Ok(temporary_redirect(location))
}

/// POST /payment/webhook?gateway=...
///
/// Requires the explicit `gateway` parameter.
pub async fn dispatch_webhook(hints: web::Query<GatewayHints>) -> Result<HttpResponse> {
    let gateway = resolve_explicit(&hints)?;

    info!(gateway = %gateway, "Dispatching webhook");
    Ok(temporary_redirect(gateway.webhook_path()))
}

/// Configure dispatch routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payment")
            .route("/callback", web::get().to(dispatch_callback))
            .route("/webhook", web::post().to(dispatch_webhook)),
    );
}
