// Integration tests for webhook authentication
//
// Bodies are signed over the exact bytes sent; any change to those bytes,
// even whitespace, has to fail verification.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::header, http::StatusCode, test, App};
use helpers::*;
use payrelay::configure;
use payrelay::webhooks::signature;
use serde_json::Value;

const CHIP_PAID: &str = r#"{"id":"pur_9f1c","status":"paid","reference":"ORD-1","purchase":{"total":12550,"currency":"MYR"}}"#;
const HITPAY_COMPLETED: &str = r#"{"payment_request_id":"hp_42","status":"completed","reference_number":"hitpay_abc123","amount":"125.50","currency":"SGD"}"#;

#[actix_web::test]
async fn test_signed_chip_webhook_is_accepted() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::post()
        .uri("/api/chip/webhook")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .insert_header(("X-Signature", signature::sign(CHIP_PAID.as_bytes(), CHIP_WEBHOOK_SECRET)))
        .set_payload(CHIP_PAID)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["gateway"], "chip");
    assert_eq!(body["external_id"], "pur_9f1c");
    assert_eq!(body["payment_status"], "completed");
}

#[actix_web::test]
async fn test_tampered_body_with_original_signature_is_rejected() {
    let chip = spawn_fake_chip();
    let state = state_for(&test_config("http://127.0.0.1:1/", &chip.base_url()));
    let app = test::init_service(App::new().configure(configure(state))).await;

    let original_signature = signature::sign(CHIP_PAID.as_bytes(), CHIP_WEBHOOK_SECRET);
    let tampered = CHIP_PAID.replace("12550", "1");

    let req = test::TestRequest::post()
        .uri("/api/chip/webhook")
        .insert_header(("X-Signature", original_signature))
        .set_payload(tampered)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 401);

    // Nothing went upstream on behalf of the forged event
    assert!(chip.recorder.calls().is_empty());
}

#[actix_web::test]
async fn test_reserialized_body_is_rejected() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let signed = signature::sign(CHIP_PAID.as_bytes(), CHIP_WEBHOOK_SECRET);
    let reparsed: Value = serde_json::from_str(CHIP_PAID).unwrap();
    let pretty = serde_json::to_string_pretty(&reparsed).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/chip/webhook")
        .insert_header(("X-Signature", signed))
        .set_payload(pretty)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_missing_signature_is_rejected() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::post()
        .uri("/api/hitpay/webhook")
        .set_payload(HITPAY_COMPLETED)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_signature_for_other_gateway_is_rejected() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    // Signed with CHIP's secret but delivered as a HitPay webhook
    let req = test::TestRequest::post()
        .uri("/api/hitpay/webhook")
        .insert_header((
            "X-HitPay-Signature",
            signature::sign(HITPAY_COMPLETED.as_bytes(), CHIP_WEBHOOK_SECRET),
        ))
        .set_payload(HITPAY_COMPLETED)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_signed_hitpay_webhook_is_accepted() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::post()
        .uri("/api/hitpay/webhook")
        .insert_header((
            "X-HitPay-Signature",
            signature::sign(HITPAY_COMPLETED.as_bytes(), HITPAY_WEBHOOK_SECRET),
        ))
        .set_payload(HITPAY_COMPLETED)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["gateway"], "hitpay");
    assert_eq!(body["external_id"], "hp_42");
    assert_eq!(body["payment_status"], "completed");
}

#[actix_web::test]
async fn test_signed_but_malformed_webhook_is_bad_request() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let payload = r#"{"status":"paid"}"#;
    let req = test::TestRequest::post()
        .uri("/api/chip/webhook")
        .insert_header(("X-Signature", signature::sign(payload.as_bytes(), CHIP_WEBHOOK_SECRET)))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_unlabeled_webhook_is_redirected_then_verified() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;
    let signed = signature::sign(CHIP_PAID.as_bytes(), CHIP_WEBHOOK_SECRET);

    let req = test::TestRequest::post()
        .uri("/payment/webhook?gateway=chip")
        .insert_header(("X-Signature", signed.clone()))
        .set_payload(CHIP_PAID)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(location, "/api/chip/webhook");

    // A 307 replays the same method and body
    let req = test::TestRequest::post()
        .uri(&location)
        .insert_header(("X-Signature", signed))
        .set_payload(CHIP_PAID)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_webhook_without_explicit_gateway_is_bad_request() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::post()
        .uri("/payment/webhook?id=chip_pur_1")
        .set_payload(CHIP_PAID)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
