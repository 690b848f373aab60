use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let settings_ok = match state.settings_service.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "settings store ping failed");
            false
        }
    };
    let status_ok = match state.status_service.log.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "status log ping failed");
            false
        }
    };

    let ok = settings_ok && status_ok;
    let status = if ok {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "ready": ok,
            "settings_store": settings_ok,
            "status_log": status_ok
        })),
    )
        .into_response()
}

pub async fn liveness() -> impl IntoResponse {
    (axum::http::StatusCode::OK, Json(serde_json::json!({"alive": true}))).into_response()
}
