use axum::response::IntoResponse;
use axum::Json;

pub async fn hello() -> impl IntoResponse {
    Json(serde_json::json!({"message": "Hello World"}))
}
