use anyhow::{bail, ensure, Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use tracing_subscriber::EnvFilter;

type Check<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

struct Smoke {
    client: reqwest::Client,
    base: String,
}

impl Smoke {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        Ok((status, resp.json().await.context("response is not JSON")?))
    }

    async fn send(&self, method: reqwest::Method, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let resp = self
            .client
            .request(method, self.url(path))
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        Ok((status, resp.json().await.context("response is not JSON")?))
    }

    async fn checkout(&self, body: Value) -> Result<(StatusCode, Value)> {
        self.send(reqwest::Method::POST, "/checkout/session", body).await
    }

    async fn hello_world(&self) -> Result<()> {
        let (status, body) = self.get("/").await?;
        ensure!(status == StatusCode::OK, "expected 200, got {status}");
        ensure!(body["message"] == "Hello World", "unexpected body {body}");
        Ok(())
    }

    async fn default_settings_shape(&self) -> Result<()> {
        let (status, body) = self.get("/payments/settings").await?;
        ensure!(status == StatusCode::OK, "expected 200, got {status}");
        for gw in ["stripe", "sslcommerz", "paypal"] {
            ensure!(body[gw]["enabled"].is_boolean(), "{gw}.enabled missing");
            ensure!(body[gw]["data"].is_object(), "{gw}.data missing");
        }
        Ok(())
    }

    async fn update_stripe(&self) -> Result<()> {
        let (status, body) = self
            .send(
                reqwest::Method::PUT,
                "/payments/settings",
                json!({"stripe": {"enabled": true, "data": {
                    "publishableKey": "pk_test_123456789",
                    "secretKey": "sk_test_987654321"
                }}}),
            )
            .await?;
        ensure!(status == StatusCode::OK, "expected 200, got {status}");
        stripe_matches(&body)
    }

    async fn update_persisted(&self) -> Result<()> {
        let (status, body) = self.get("/payments/settings").await?;
        ensure!(status == StatusCode::OK, "expected 200, got {status}");
        stripe_matches(&body)
    }

    async fn stripe_placeholder(&self) -> Result<()> {
        let (status, body) = self
            .checkout(json!({
                "items": [
                    {"id": "item_1", "title": "Premium Social Media Package", "price": 99.99, "qty": 1},
                    {"id": "item_2", "title": "Analytics Dashboard Access", "price": 29.99, "qty": 2}
                ],
                "method": "stripe",
                "currency": "USD",
                "success_url": "https://example.com/success",
                "cancel_url": "https://example.com/cancel"
            }))
            .await?;
        ensure!(status == StatusCode::OK, "expected 200, got {status}");
        expect_session(&body, "placeholder", "stripe")?;
        ensure!(body["amount"] == json!(159.97), "unexpected amount {}", body["amount"]);
        Ok(())
    }

    async fn cod_mock(&self) -> Result<()> {
        let (status, body) = self
            .checkout(json!({
                "items": [{"id": "item_1", "title": "Basic Social Media Package", "price": 49.99, "qty": 1}],
                "method": "cod",
                "currency": "USD"
            }))
            .await?;
        ensure!(status == StatusCode::OK, "expected 200, got {status}");
        expect_session(&body, "mock", "cod")
    }

    async fn disabled_stripe_not_configured(&self) -> Result<()> {
        let (status, settings) = self
            .send(
                reqwest::Method::PUT,
                "/payments/settings",
                json!({"stripe": {"enabled": false, "data": {}}}),
            )
            .await?;
        stripe_disabled(status, &settings)?;

        let (status, body) = self
            .checkout(json!({
                "items": [{"id": "item_1", "title": "Test Product", "price": 10.0, "qty": 1}],
                "method": "stripe"
            }))
            .await?;
        ensure!(status == StatusCode::OK, "expected 200, got {status}");
        expect_session(&body, "not_configured", "stripe")
    }

    async fn bogus_method_rejected(&self) -> Result<()> {
        let (status, body) = self.checkout(json!({"items": [], "method": "bogus"})).await?;
        ensure!(status == StatusCode::BAD_REQUEST, "expected 400, got {status}");
        ensure!(body["error"]["code"] == "UNSUPPORTED_METHOD", "unexpected body {body}");
        Ok(())
    }
}

fn stripe_matches(body: &Value) -> Result<()> {
    let stripe = &body["stripe"];
    ensure!(stripe["enabled"] == true, "stripe not enabled: {stripe}");
    ensure!(stripe["data"]["publishableKey"] == "pk_test_123456789", "publishableKey mismatch: {stripe}");
    ensure!(stripe["data"]["secretKey"] == "sk_test_987654321", "secretKey mismatch: {stripe}");
    Ok(())
}

fn stripe_disabled(status: StatusCode, body: &Value) -> Result<()> {
    ensure!(status == StatusCode::OK, "disabling stripe: expected 200, got {status}");
    ensure!(
        body["stripe"]["enabled"] == false,
        "stripe still enabled after update: {}",
        body["stripe"]
    );
    Ok(())
}

fn expect_session(body: &Value, status: &str, method: &str) -> Result<()> {
    if body["status"] != status || body["method"] != method {
        bail!("expected status={status} method={method}, got {body}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backend = std::env::var("BACKEND_URL").context("BACKEND_URL is not set")?;
    let prefix = std::env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string());
    let smoke = Smoke {
        client: reqwest::Client::new(),
        base: format!("{}{}", backend.trim_end_matches('/'), prefix.trim_end_matches('/')),
    };
    tracing::info!(base = %smoke.base, "running smoke checks");

    // Order matters: later checks depend on settings written by earlier ones.
    let checks: Vec<(&str, Check<'_>)> = vec![
        ("hello world", Box::pin(smoke.hello_world())),
        ("default settings shape", Box::pin(smoke.default_settings_shape())),
        ("update stripe settings", Box::pin(smoke.update_stripe())),
        ("stripe settings persisted", Box::pin(smoke.update_persisted())),
        ("stripe checkout placeholder", Box::pin(smoke.stripe_placeholder())),
        ("cod checkout mock", Box::pin(smoke.cod_mock())),
        ("disabled stripe not configured", Box::pin(smoke.disabled_stripe_not_configured())),
        ("bogus method rejected", Box::pin(smoke.bogus_method_rejected())),
    ];

    let total = checks.len();
    let mut failed = 0;
    for (name, check) in checks {
        match check.await {
            Ok(()) => println!("PASS - {name}"),
            Err(e) => {
                failed += 1;
                println!("FAIL - {name}: {e:#}");
            }
        }
    }

    println!("\n{total} checks, {} passed, {failed} failed", total - failed);
    if failed > 0 {
        bail!("{failed} smoke check(s) failed");
    }
    Ok(())
}
