use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
    #[error("stored document is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("stored column could not be decoded: {0}")]
    Undecodable(sqlx::Error),
}

impl StoreError {
    /// Classifies an error from reading a stored value: a decode failure means
    /// the data is bad, anything else means the store is.
    pub fn from_decode(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => StoreError::Undecodable(e),
            other => StoreError::Unavailable(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("request validation failed")]
    Validation { fields: Vec<FieldError> },
    #[error("unsupported payment method: {0}")]
    UnsupportedMethod(String),
    #[error("{0}")]
    StorageUnavailable(String),
    #[error("{0}")]
    CorruptState(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) => AppError::StorageUnavailable(e.to_string()),
            StoreError::Corrupt(_) | StoreError::Undecodable(_) => AppError::CorruptState(e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::UnsupportedMethod(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) | AppError::CorruptState(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::UnsupportedMethod(_) => "UNSUPPORTED_METHOD",
            AppError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            AppError::CorruptState(_) => "CORRUPT_STATE",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let (message, details, fields) = match self {
            AppError::Validation { fields } => (self.to_string(), None, fields.clone()),
            AppError::UnsupportedMethod(method) => (
                "Unsupported payment method".to_string(),
                Some(method.clone()),
                Vec::new(),
            ),
            AppError::StorageUnavailable(_) | AppError::CorruptState(_) => {
                ("internal error".to_string(), Some(self.to_string()), Vec::new())
            }
        };
        ErrorEnvelope {
            error: ErrorPayload {
                code: self.code().to_string(),
                message,
                details,
                fields,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }
        (status, Json(self.envelope())).into_response()
    }
}
