use crate::domain::status::StatusCheckCreate;
use crate::error::AppError;
use crate::http::extract::json_body;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_status_check(
    State(state): State<AppState>,
    payload: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = json_body(payload)?;
    let check = state.status_service.create(req.client_name).await?;
    Ok((axum::http::StatusCode::OK, Json(check)))
}

pub async fn list_status_checks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let checks = state.status_service.list().await?;
    Ok((axum::http::StatusCode::OK, Json(checks)))
}
