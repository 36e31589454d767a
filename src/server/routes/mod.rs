mod categories;
mod questions;
mod quizzes;

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::Error;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

#[derive(Debug)]
pub enum ApiError {
    Service(Error),
    Payload(JsonRejection),
    Internal(anyhow::Error),
}

pub type ApiResponse<T> = Result<T, ApiError>;

/// JSON request body whose rejections are reported like every other client
/// error.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct Payload<T>(pub T);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError::Service(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Payload(rejection)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Service(error) => match error {
                Error::NotFound { .. } | Error::EmptyQuiz(_) => {
                    (StatusCode::NOT_FOUND, error.to_string())
                }
                Error::Validation(_) => (StatusCode::BAD_REQUEST, error.to_string()),
                Error::Database(_) => {
                    tracing::error!("Database failure: {}", error);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_owned(),
                    )
                }
            },
            ApiError::Payload(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ApiError::Internal(error) => {
                tracing::error!("Internal failure: {:#}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
