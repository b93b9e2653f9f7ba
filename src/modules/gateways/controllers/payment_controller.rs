use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};
use crate::modules::gateways::models::{Gateway, PaymentRequest};
use crate::modules::gateways::services::GatewayService;

/// Storefront checkout body for CHIP
#[derive(Debug, Deserialize)]
pub struct ChipCheckoutBody {
    pub amount: Option<Decimal>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub currency: Option<String>,
}

/// Storefront payment body for HitPay
#[derive(Debug, Deserialize)]
pub struct HitpayPaymentBody {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub reference: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

/// Query a gateway appends when sending the shopper back
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub reference: Option<String>,
    pub id: Option<String>,
    pub status: Option<String>,
}

fn parse_currency(value: Option<&str>, default: Currency) -> Result<Currency> {
    match value {
        Some(code) => code.parse().map_err(AppError::InvalidInput),
        None => Ok(default),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/chip/create-payment
///
/// Body `{ amount, email, name }` -> `{ checkout_url }`; the order
/// reference is generated here and sent as the idempotency key.
pub async fn create_chip_payment(
    service: web::Data<GatewayService>,
    body: web::Json<ChipCheckoutBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();

    let amount = body
        .amount
        .filter(|amount| *amount > Decimal::ZERO)
        .ok_or_else(|| AppError::invalid_input("Bad amount"))?;
    let currency = parse_currency(body.currency.as_deref(), Currency::MYR)?;

    let mut request = PaymentRequest::new(amount, currency, PaymentRequest::generate_reference());
    request.email = non_blank(body.email);
    request.name = non_blank(body.name);
    request.phone = non_blank(body.phone);

    let payment = service.create_payment(Gateway::Chip, request).await?;

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        checkout_url: payment.checkout_url,
    }))
}

/// POST /api/hitpay/create-payment
///
/// Relays HitPay's own payment-request document back to the caller.
pub async fn create_hitpay_payment(
    service: web::Data<GatewayService>,
    body: web::Json<HitpayPaymentBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();

    let (Some(amount), Some(reference)) = (body.amount, non_blank(body.reference)) else {
        return Err(AppError::invalid_input("Missing required payment fields"));
    };
    let currency = parse_currency(body.currency.as_deref(), Currency::SGD)?;

    let mut request = PaymentRequest::new(amount, currency, reference);
    request.email = non_blank(body.email);
    request.name = non_blank(body.name);
    request.phone = non_blank(body.phone);
    request.description = non_blank(body.description);

    let payment = service.create_payment(Gateway::Hitpay, request).await?;

    Ok(HttpResponse::Ok().json(payment.raw))
}

/// GET /api/{gateway}/payments/{id}
pub async fn get_payment_status(
    service: web::Data<GatewayService>,
    path: web::Path<(Gateway, String)>,
) -> Result<HttpResponse> {
    let (gateway, external_id) = path.into_inner();
    let report = service.get_status(gateway, &external_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/{gateway}/callback
///
/// Return leg of the hosted checkout. HitPay identifies the payment by
/// `reference`, CHIP by `id`; the status is confirmed with the gateway
/// rather than trusted from the query string.
pub async fn payment_callback(
    service: web::Data<GatewayService>,
    path: web::Path<Gateway>,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse> {
    let gateway = path.into_inner();
    let query = query.into_inner();

    let external_id = match gateway {
        Gateway::Hitpay => non_blank(query.reference),
        Gateway::Chip => non_blank(query.id),
    }
    .ok_or_else(|| {
        AppError::invalid_input(format!("Missing payment identifier for {} callback", gateway))
    })?;

    tracing::info!(
        gateway = %gateway,
        external_id = %external_id,
        reported_status = query.status.as_deref().unwrap_or("-"),
        "Payment callback received"
    );

    let report = service.get_status(gateway, &external_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/chip/create-payment",
        web::post().to(create_chip_payment),
    )
    .route(
        "/api/hitpay/create-payment",
        web::post().to(create_hitpay_payment),
    )
    .route("/api/{gateway}/callback", web::get().to(payment_callback))
    .route(
        "/api/{gateway}/payments/{id}",
        web::get().to(get_payment_status),
    );
}
