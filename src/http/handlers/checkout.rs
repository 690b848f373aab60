use crate::domain::checkout::CheckoutRequest;
use crate::error::AppError;
use crate::http::extract::json_body;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = json_body(payload)?;
    let resp = state.checkout_service.create_session(req).await?;
    Ok((axum::http::StatusCode::OK, Json(resp)))
}
