use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use phonebook_service::{DirectoryError, ErrorClass};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Errors from starting and running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] phonebook_store::StoreError),

    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors a request handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The request body was not a JSON object of the expected shape.
    #[error("malformatted request body")]
    MalformedBody(String),

    #[error("unknown endpoint")]
    UnknownEndpoint,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Directory(err) => match err.class() {
                ErrorClass::Client => (StatusCode::BAD_REQUEST, err.to_string()),
                ErrorClass::Absent => (StatusCode::NOT_FOUND, err.to_string()),
                ErrorClass::Server => {
                    error!(error = %err, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_string(),
                    )
                }
            },
            ApiError::MalformedBody(detail) => {
                debug!(%detail, "rejected request body");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::UnknownEndpoint => (StatusCode::NOT_FOUND, self.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
