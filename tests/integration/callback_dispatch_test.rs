// Integration tests for the shared return URL
//
// `/payment/callback` only decides which gateway a shopper came back from;
// the gateway-specific callback then confirms the status upstream.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{dev::ServiceResponse, http::header, http::StatusCode, test, App};
use helpers::*;
use payrelay::configure;
use serde_json::Value;

fn location(resp: &ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn test_hitpay_reference_redirects_to_hitpay_callback() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::get()
        .uri("/payment/callback?reference=hitpay_abc123")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&resp),
        "/api/hitpay/callback?reference=hitpay_abc123"
    );
}

#[actix_web::test]
async fn test_chip_purchase_id_redirects_to_chip_callback() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::get()
        .uri("/payment/callback?id=chip_pur_77&status=paid")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), "/api/chip/callback?id=chip_pur_77&status=paid");
}

#[actix_web::test]
async fn test_explicit_gateway_beats_identifier_shape() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::get()
        .uri("/payment/callback?gateway=hitpay&id=chip_123")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&resp).starts_with("/api/hitpay/callback?"));
}

#[actix_web::test]
async fn test_unattributable_callback_is_bad_request() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    for uri in [
        "/payment/callback",
        "/payment/callback?reference=ORD-1",
        "/payment/callback?gateway=stripe",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Unable to determine payment gateway"));
    }
}

#[actix_web::test]
async fn test_redirected_callback_confirms_status_upstream() {
    let hitpay = spawn_fake_hitpay();
    let state = state_for(&test_config(&hitpay.base_url(), "http://127.0.0.1:1/"));
    let app = test::init_service(App::new().configure(configure(state))).await;

    let req = test::TestRequest::get()
        .uri("/payment/callback?reference=hitpay_abc123&status=completed")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let req = test::TestRequest::get().uri(&location(&resp)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["gateway"], "hitpay");
    assert_eq!(body["external_id"], "hitpay_abc123");
    assert_eq!(body["status"], "completed");

    let call = hitpay.recorder.last();
    assert_eq!(call.method, "GET");
    assert_eq!(call.path, "/payment-requests/hitpay_abc123");
}

#[actix_web::test]
async fn test_gateway_callback_requires_identifier() {
    let app = test::init_service(App::new().configure(configure(offline_state()))).await;

    let req = test::TestRequest::get()
        .uri("/api/chip/callback?reference=hitpay_abc123")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_callback_id_cannot_leave_the_purchase_resource() {
    let chip = spawn_fake_chip();
    let state = state_for(&test_config("http://127.0.0.1:1/", &chip.base_url()));
    let app = test::init_service(App::new().configure(configure(state))).await;

    // id=../clients/cli_1?x=
    let req = test::TestRequest::get()
        .uri("/api/chip/callback?id=..%2Fclients%2Fcli_1%3Fx%3D")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Same id through the shared return URL and the redirect it issues
    let req = test::TestRequest::get()
        .uri("/payment/callback?gateway=chip&id=..%2Fclients%2Fcli_1%3Fx%3D")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let req = test::TestRequest::get().uri(&location(&resp)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // No credentialed request reached the gateway
    assert!(chip.recorder.calls().is_empty());
}

#[actix_web::test]
async fn test_status_lookup_rejects_non_token_id() {
    let hitpay = spawn_fake_hitpay();
    let state = state_for(&test_config(&hitpay.base_url(), "http://127.0.0.1:1/"));
    let app = test::init_service(App::new().configure(configure(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/hitpay/callback?reference=hp_1%3Fx%3D1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/hitpay/payments/hp.1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(hitpay.recorder.calls().is_empty());
}
