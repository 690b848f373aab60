use crate::error::{AppError, FieldError};
use axum::extract::rejection::JsonRejection;
use axum::Json;

/// Turns axum's JSON rejection into a 400 validation error so every
/// malformed body gets the same envelope.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let field = match &rejection {
                JsonRejection::MissingJsonContentType(_) => "content-type",
                _ => "body",
            };
            Err(AppError::Validation {
                fields: vec![FieldError::new(field, rejection.body_text())],
            })
        }
    }
}
