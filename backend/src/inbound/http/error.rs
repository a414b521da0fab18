//! Rendering of domain errors as failure envelopes.
//!
//! Status codes follow the error category; the body is always an
//! [`ErrorEnvelope`]. Internal failures are logged against the request's
//! trace id before the (possibly redacted) message is returned.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, ErrorEnvelope, TraceId, UNEXPECTED_ERROR_MESSAGE};

impl ErrorCode {
    /// HTTP status used when a failure of this category reaches a client.
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::Conflict => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().http_status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            match TraceId::current() {
                Some(trace_id) => error!(%trace_id, message = self.message(), "request failed"),
                None => error!(message = self.message(), "request failed"),
            }
        }
        HttpResponse::build(self.status_code()).json(ErrorEnvelope::from(self.clone()))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in a handler");
        Self::internal(UNEXPECTED_ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
