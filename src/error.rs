use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;

pub const MISSING_PROMPT: &str = "Prompt is missing in the request body.";
pub const PROVIDER_ERROR: &str = "OpenAI API Error";
pub const MALFORMED_RESPONSE: &str = "Unexpected response format from OpenAI.";
pub const INTERNAL_ERROR: &str = "Something went wrong on the server.";
pub const PAYLOAD_TOO_LARGE: &str = "Request body is too large.";
pub const NOT_FOUND: &str = "Not found";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("prompt is missing")]
    MissingPrompt,
    #[error("request body is too large")]
    PayloadTooLarge,
    #[error("route not found")]
    NotFound,
    #[error("provider returned {status}: {message}")]
    Provider {
        status: StatusCode,
        message: String,
        code: Option<String>,
    },
    #[error("unexpected response format from provider")]
    MalformedResponse,
    #[error("internal error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, RelayError>;

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::MissingPrompt => (StatusCode::BAD_REQUEST, ErrorResponse::new(MISSING_PROMPT)),
            Self::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse::new(PAYLOAD_TOO_LARGE),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::new(NOT_FOUND)),
            Self::Provider {
                status,
                message,
                code,
            } => (
                status,
                ErrorResponse {
                    error: PROVIDER_ERROR.to_string(),
                    details: Some(message),
                    code,
                },
            ),
            Self::MalformedResponse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(MALFORMED_RESPONSE),
            ),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(INTERNAL_ERROR),
            ),
        };

        (status, Json(body)).into_response()
    }
}
