use crate::domain::settings::PaymentSettingsUpdate;
use crate::error::AppError;
use crate::http::extract::json_body;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_payment_settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings_service.get().await?;
    Ok((axum::http::StatusCode::OK, Json(settings)))
}

pub async fn put_payment_settings(
    State(state): State<AppState>,
    payload: Result<Json<PaymentSettingsUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let update = json_body(payload)?;
    let settings = state.settings_service.update(update).await?;
    Ok((axum::http::StatusCode::OK, Json(settings)))
}
