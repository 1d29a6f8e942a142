//! # Caller Identification
//!
//! Authentication itself lives upstream (a gateway resolves bearer tokens and
//! forwards the resolved user id). This module extracts that identity from
//! the `X-Caller-Id` header; booking endpoints treat an absent header as an
//! anonymous caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use slotwise_core::errors::SlotwiseError;
use uuid::Uuid;

use super::error_handling::AppError;

pub const CALLER_ID_HEADER: &str = "x-caller-id";

/// The upstream-resolved caller, `None` for anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Option<Uuid>);

impl Caller {
    /// The caller's user id, or `Forbidden` when the endpoint requires an
    /// authenticated caller.
    pub fn require(self) -> Result<Uuid, AppError> {
        self.0.ok_or_else(|| {
            AppError(SlotwiseError::Forbidden(
                "This endpoint requires an authenticated caller".to_string(),
            ))
        })
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(CALLER_ID_HEADER) {
            None => Ok(Caller(None)),
            Some(value) => {
                let raw = value.to_str().map_err(|_| {
                    AppError(SlotwiseError::Validation(
                        "Malformed X-Caller-Id header".to_string(),
                    ))
                })?;
                let id = raw.parse::<Uuid>().map_err(|_| {
                    AppError(SlotwiseError::Validation(
                        "X-Caller-Id must be a UUID".to_string(),
                    ))
                })?;
                Ok(Caller(Some(id)))
            }
        }
    }
}
