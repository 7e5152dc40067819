//! Error types for the patient records server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Error connecting to BMI API: {0}")]
    Upstream(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::UnprocessableEntity(_) | Error::InvalidImage(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            // Upstream failures surface their wrapped message to the caller.
            Error::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Error::Inference(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Error::Database(_) | Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": status_label(status),
            "code": status.as_u16(),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

fn status_label(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "not-found",
        StatusCode::UNPROCESSABLE_ENTITY => "validation",
        StatusCode::UNAUTHORIZED => "unauthorized",
        _ => "internal",
    }
}
