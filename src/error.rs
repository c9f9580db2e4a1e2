use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SnippetboxError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid data source name: {0}")]
    InvalidDsn(String),

    #[error("no matching record found")]
    NoRecord,

    #[error("invalid snippet: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server loop terminated without an error")]
    ServerClosed,
}

impl SnippetboxError {
    /// Folds the driver's row-miss into the domain-level miss so callers can
    /// match on a single variant.
    pub fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => SnippetboxError::NoRecord,
            other => SnippetboxError::Database(other),
        }
    }
}

impl IntoResponse for SnippetboxError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            SnippetboxError::NoRecord => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "Snippet not found.".to_string(),
                },
            ),
            SnippetboxError::Validation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "INVALID_SNIPPET".to_string(),
                    message,
                },
            ),
            SnippetboxError::Database(_)
            | SnippetboxError::InvalidDsn(_)
            | SnippetboxError::Io(_)
            | SnippetboxError::ServerClosed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
