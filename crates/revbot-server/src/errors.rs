//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use revbot_core::DomainError;
use thiserror::Error;

/// Server error.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Logic error,\n  caused by: {source}")]
    DomainError { source: DomainError },

    #[error("I/O error,\n  caused by: {source}")]
    IoError { source: std::io::Error },
}

impl ServerError {
    fn code(&self) -> &'static str {
        match self {
            Self::DomainError { source } => source.code(),
            Self::IoError { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServerError {
    fn from(e: DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            "BAD_REQUEST" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            // Remaining codes are state conflicts: PR_EXISTS, TEAM_EXISTS,
            // PR_MERGED, NOT_ASSIGNED, NO_CANDIDATE.
            _ => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
