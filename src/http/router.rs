use crate::config::AppConfig;
use crate::http::handlers::{checkout, ops, payment_settings, root, status};
use crate::http::middleware::cors::cors_layer;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState, cfg: &AppConfig) -> Router {
    let api = Router::new()
        .route("/", get(root::hello))
        .route(
            "/status",
            post(status::create_status_check).get(status::list_status_checks),
        )
        .route(
            "/payments/settings",
            get(payment_settings::get_payment_settings).put(payment_settings::put_payment_settings),
        )
        .route("/checkout/session", post(checkout::create_checkout_session))
        .route("/ops/readiness", get(ops::readiness))
        .route("/ops/liveness", get(ops::liveness))
        .with_state(state);

    let app = if cfg.api_prefix.is_empty() {
        api
    } else {
        // Nested "/" only matches the bare prefix; keep the trailing-slash form reachable.
        Router::new()
            .route(&format!("{}/", cfg.api_prefix), get(root::hello))
            .nest(&cfg.api_prefix, api)
    };

    app.layer(cors_layer(&cfg.cors))
        .layer(TraceLayer::new_for_http())
}
