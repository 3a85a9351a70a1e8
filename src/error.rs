use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

/// Error taxonomy for the action surface. Each kind maps to a distinct HTTP
/// status so clients can tell "retry after re-reading" (`InvalidState`) apart
/// from "never valid" (`Forbidden`, `Validation`) and "stale reference"
/// (`NotFound`).
#[derive(Debug, Display, Error, PartialEq)]
pub enum ApiError {
    #[display(fmt = "authentication required")]
    Unauthenticated,

    #[display(fmt = "caller lacks rights for this action")]
    Forbidden,

    #[display(fmt = "resource not found")]
    NotFound,

    /// The request is not in a state that permits the action, including a
    /// conditional write lost to a concurrent decision.
    #[display(fmt = "request state does not permit this action")]
    InvalidState,

    #[display(fmt = "{}", _0)]
    Validation(#[error(not(source))] String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::Forbidden => "forbidden",
            ApiError::NotFound => "not_found",
            ApiError::InvalidState => "invalid_state",
            ApiError::Validation(_) => "validation",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidState => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}
