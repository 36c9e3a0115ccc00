// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::error;

use crate::chain::{FailureKind, HandlerResult};
use crate::matches::facade::DetailError;
use crate::matches::services::CommandError;

/// A collaborator could not be reached. Never a domain rejection.
#[derive(Debug, Error)]
pub enum InfrastructureFault {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    InvalidState(String),
    InvalidArgument(String),
    Inconsistent(String),
    InternalServer(String),
    ServiceUnavailable(InfrastructureFault),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InvalidState(msg) => write!(f, "Invalid State: {}", msg),
            ApiError::InvalidArgument(msg) => write!(f, "Invalid Argument: {}", msg),
            ApiError::Inconsistent(msg) => write!(f, "Inconsistent: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ServiceUnavailable(fault) => write!(f, "Service Unavailable: {}", fault),
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidState(_) => StatusCode::CONFLICT,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Inconsistent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServer(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let (error_message, code) = match self {
            ApiError::NotFound(msg) => (msg, FailureKind::NotFound.code()),
            ApiError::InvalidState(msg) => (msg, FailureKind::InvalidState.code()),
            ApiError::InvalidArgument(msg) => (msg, FailureKind::InvalidArgument.code()),
            ApiError::Inconsistent(msg) => (msg, FailureKind::Inconsistent.code()),
            ApiError::InternalServer(msg) => (msg, "INTERNAL_SERVER_ERROR"),
            ApiError::ServiceUnavailable(fault) => {
                error!(error = %fault, "Infrastructure fault while serving request");
                (
                    "A backing data store is unavailable".to_string(),
                    "SERVICE_UNAVAILABLE",
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Converts a rejected chain result into the matching API error
impl From<HandlerResult> for ApiError {
    fn from(result: HandlerResult) -> Self {
        let message = match result.originating_handler() {
            Some(handler) => format!("{} ({})", result.message(), handler),
            None => result.message().to_string(),
        };

        match result.kind() {
            Some(FailureKind::NotFound) => ApiError::NotFound(message),
            Some(FailureKind::InvalidState) => ApiError::InvalidState(message),
            Some(FailureKind::InvalidArgument) => ApiError::InvalidArgument(message),
            Some(FailureKind::Inconsistent) => ApiError::Inconsistent(message),
            None => ApiError::InternalServer(
                "Successful validation result was converted to an error".to_string(),
            ),
        }
    }
}

impl From<InfrastructureFault> for ApiError {
    fn from(fault: InfrastructureFault) -> Self {
        ApiError::ServiceUnavailable(fault)
    }
}

impl From<DetailError> for ApiError {
    fn from(err: DetailError) -> Self {
        match err {
            DetailError::NotFound(match_id) => {
                ApiError::NotFound(format!("Match {} not found", match_id))
            }
            DetailError::Infrastructure(fault) => ApiError::ServiceUnavailable(fault),
        }
    }
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Rejected(result) => ApiError::from(result),
            CommandError::Infrastructure(fault) => ApiError::ServiceUnavailable(fault),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_kinds_map_to_status_codes() {
        let cases = [
            (FailureKind::NotFound, StatusCode::NOT_FOUND),
            (FailureKind::InvalidState, StatusCode::CONFLICT),
            (FailureKind::InvalidArgument, StatusCode::BAD_REQUEST),
            (FailureKind::Inconsistent, StatusCode::UNPROCESSABLE_ENTITY),
        ];

        for (kind, status) in cases {
            let err = ApiError::from(HandlerResult::failure(kind, "rejected"));
            assert_eq!(err.status_code(), status, "kind {:?}", kind);
        }
    }

    #[test]
    fn test_infrastructure_fault_is_not_a_rejection() {
        let err = ApiError::from(CommandError::Infrastructure(InfrastructureFault::Unavailable(
            "pool closed".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_rejection_message_names_the_handler() {
        let result = HandlerResult::failure(FailureKind::NotFound, "Match 7 not found")
            .attributed_to("MatchExists");
        match ApiError::from(result) {
            ApiError::NotFound(msg) => assert_eq!(msg, "Match 7 not found (MatchExists)"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
