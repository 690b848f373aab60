use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use checkout_backend::config::AppConfig;
use checkout_backend::http::router::build_router;
use checkout_backend::repo::in_memory::{InMemorySettingsStore, InMemoryStatusLog};
use checkout_backend::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(
        Arc::new(InMemorySettingsStore::new()),
        Arc::new(InMemoryStatusLog::new()),
        1000,
    );
    build_router(state, &AppConfig::default())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn hello_world_under_prefix() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello World"}));

    let (status, _) = call(&app, Method::GET, "/api/", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn status_checks_are_appended_in_order() {
    let app = app();
    let (status, created) = call(&app, Method::POST, "/api/status", Some(json!({"client_name": "first"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["client_name"], "first");
    assert!(uuid::Uuid::parse_str(created["id"].as_str().unwrap()).is_ok());

    call(&app, Method::POST, "/api/status", Some(json!({"client_name": "second"}))).await;

    let (status, list) = call(&app, Method::GET, "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
    assert_eq!(list[0]["id"], created["id"]);
}

#[tokio::test]
async fn status_check_without_client_name_is_400() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/api/status", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn settings_are_created_once() {
    let app = app();
    let (status, first) = call(&app, Method::GET, "/api/payments/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], "settings");
    for gw in ["stripe", "sslcommerz", "paypal"] {
        assert_eq!(first[gw], json!({"enabled": false, "data": {}}));
    }

    let (_, second) = call(&app, Method::GET, "/api/payments/settings", None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn settings_update_merges_credentials() {
    let app = app();
    let (_, before) = call(&app, Method::GET, "/api/payments/settings", None).await;

    let (status, after) = call(
        &app,
        Method::PUT,
        "/api/payments/settings",
        Some(json!({"stripe": {"enabled": true, "data": {"publishableKey": "pk_1", "secretKey": "sk_1"}}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["stripe"]["enabled"], true);
    assert_eq!(after["sslcommerz"], before["sslcommerz"]);
    assert_eq!(after["paypal"], before["paypal"]);
    assert_eq!(after["created_at"], before["created_at"]);

    let (_, after) = call(
        &app,
        Method::PUT,
        "/api/payments/settings",
        Some(json!({"stripe": {"data": {"secretKey": "sk_2"}}})),
    )
    .await;
    assert_eq!(after["stripe"]["enabled"], true);
    assert_eq!(after["stripe"]["data"], json!({"publishableKey": "pk_1", "secretKey": "sk_2"}));

    let (_, reread) = call(&app, Method::GET, "/api/payments/settings", None).await;
    assert_eq!(reread, after);
}

#[tokio::test]
async fn malformed_settings_body_is_400() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/payments/settings",
        Some(json!({"stripe": {"enabled": "yes"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["fields"][0]["field"], "body");
}

#[tokio::test]
async fn configured_stripe_returns_placeholder() {
    let app = app();
    call(
        &app,
        Method::PUT,
        "/api/payments/settings",
        Some(json!({"stripe": {"enabled": true, "data": {"secretKey": "sk_1"}}})),
    )
    .await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "stripe", "items": [{"id": "a", "title": "t", "price": 10, "qty": 2}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "placeholder");
    assert_eq!(body["method"], "stripe");
    assert_eq!(body["amount"], json!(20.0));
    assert_eq!(body["currency"], "USD");
}

#[tokio::test]
async fn fresh_paypal_is_not_configured() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "PayPal", "items": [{"id": "a", "title": "t", "price": 5, "qty": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_configured");
    assert_eq!(body["method"], "paypal");
    assert_eq!(body["amount"], json!(5.0));
}

#[tokio::test]
async fn disabling_gateway_keeps_keys_but_blocks_checkout() {
    let app = app();
    call(
        &app,
        Method::PUT,
        "/api/payments/settings",
        Some(json!({"sslcommerz": {"enabled": true, "data": {"storeId": "s", "storePassword": "p"}}})),
    )
    .await;
    let (_, settings) = call(
        &app,
        Method::PUT,
        "/api/payments/settings",
        Some(json!({"sslcommerz": {"enabled": false, "data": {}}})),
    )
    .await;
    assert_eq!(settings["sslcommerz"]["data"]["storeId"], "s");

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "sslcommerz", "items": []})),
    )
    .await;
    assert_eq!(body["status"], "not_configured");
    assert_eq!(body["amount"], json!(0.0));
}

#[tokio::test]
async fn cod_is_mock_regardless_of_settings() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "COD", "currency": "bdt", "items": [{"id": "a", "title": "t", "price": 49.99, "qty": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "mock");
    assert_eq!(body["method"], "cod");
    assert_eq!(body["amount"], json!(49.99));
    assert_eq!(body["currency"], "BDT");
}

#[tokio::test]
async fn unknown_method_is_400() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "bogus", "items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_METHOD");
}

#[tokio::test]
async fn invalid_items_are_400_with_fields() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "cod", "items": [{"id": "a", "title": "t", "price": -1, "qty": 0}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["items[0].price", "items[0].qty"]);
}

#[tokio::test]
async fn ops_endpoints_report_healthy_stores() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/ops/liveness", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alive"], true);

    let (status, body) = call(&app, Method::GET, "/api/ops/readiness", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ready": true, "settings_store": true, "status_log": true}));
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = app();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/payments/settings")
        .header("origin", "https://shop.example")
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(
        resp.headers().get("access-control-allow-methods").unwrap(),
        "PUT"
    );
}

#[tokio::test]
async fn huge_prices_keep_a_numeric_amount() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "cod", "items": [{"id": "a", "title": "t", "price": 1e307, "qty": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], json!(1e307));

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/checkout/session",
        Some(json!({"method": "cod", "items": [{"id": "a", "title": "t", "price": 1e300, "qty": i64::MAX}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["fields"][0]["field"], "items");
}

#[tokio::test]
async fn status_list_is_capped_at_1000() {
    let app = app();
    for i in 0..1001 {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/status",
            Some(json!({"client_name": format!("client-{i}")})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, list) = call(&app, Method::GET, "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1000);
    assert_eq!(list[0]["client_name"], "client-0");
    assert_eq!(list[999]["client_name"], "client-999");
}
