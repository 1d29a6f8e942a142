//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Slotwise
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, ensuring a consistent error handling experience
//! across the entire API.
//!
//! Not-found and conflict are deliberately distinct: a caller hitting a 409
//! on booking is expected to pick a different slot, not retry the same one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotwise_core::errors::SlotwiseError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `SlotwiseError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub SlotwiseError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status
/// code and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            SlotwiseError::SlotNotFound(_)
            | SlotwiseError::AppointmentNotFound(_)
            | SlotwiseError::ServiceNotFound(_)
            | SlotwiseError::UserNotFound(_) => StatusCode::NOT_FOUND,
            SlotwiseError::SlotAlreadyBooked(_) => StatusCode::CONFLICT,
            SlotwiseError::InvalidWindow { .. } | SlotwiseError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            SlotwiseError::Forbidden(_) => StatusCode::FORBIDDEN,
            SlotwiseError::Database(_) | SlotwiseError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Maps errors escaping the middleware stack (currently only the request
/// timeout) to an HTTP response.
pub async fn handle_middleware_error(err: tower::BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Unhandled internal error: {err}") })),
        )
    }
}

/// Automatic conversion from SlotwiseError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, SlotwiseError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<SlotwiseError> for AppError {
    fn from(err: SlotwiseError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the eyre error in a `SlotwiseError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotwiseError::Database(err))
    }
}
