//! Success half of the response envelope.
//!
//! Failures are rendered from [`crate::domain::Error`]; both halves share the
//! `{ ok, message }` prefix.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use pagination::{Page, Pagination};
use serde::Serialize;
use utoipa::ToSchema;

/// Wire form of a successful response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Always `true` for successes.
    #[schema(example = true)]
    pub ok: bool,
    /// Human-readable summary.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Present on list responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Envelope carrying a single record.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    /// Envelope with a message and no payload.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }

    /// Render the envelope with `status`.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl<T: Serialize> ApiEnvelope<Vec<T>> {
    /// Envelope carrying one page of records.
    pub fn with_page(message: impl Into<String>, page: Page<T>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: Some(page.data),
            pagination: Some(page.pagination),
        }
    }
}
