//! Request capture.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Read the body of a matched request exactly once
//! - Parse form-encoded bodies into ordered fields
//! - Build the history entry for the request
//!
//! # Design Decisions
//! - Bodies are read in full, without a size cap; only log previews are bounded
//! - Form bodies are stored as `key=value` pairs joined by `&`, in arrival
//!   order, with percent-escapes decoded, so they may differ byte-wise from
//!   what the client sent
//! - Other content types are stored untouched

use axum::body::{Body, Bytes};
use axum::http::{header, request::Parts, HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::history::HistoryEntry;

pub const X_REQUEST_ID: &str = "x-request-id";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Decoded `application/x-www-form-urlencoded` fields, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        Self(url::form_urlencoded::parse(body).into_owned().collect())
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// First value of `name`, if the field was sent at all (empty values count).
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `k=v&k=v` from the decoded fields.
    pub fn reconstruct(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether the media type (parameters ignored) is form-urlencoded.
pub fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|media| media.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        .unwrap_or(false)
}

/// What a matched request contributes to history and to admin handlers.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub form: FormFields,
    pub entry: HistoryEntry,
}

impl CapturedRequest {
    /// Consume the body and snapshot the request.
    pub async fn read(parts: &Parts, body: Body) -> Result<Self, axum::Error> {
        let bytes = axum::body::to_bytes(body, usize::MAX).await?;
        Ok(Self::from_bytes(parts, bytes))
    }

    pub fn from_bytes(parts: &Parts, bytes: Bytes) -> Self {
        let query_raw = parts.uri.query().unwrap_or_default().to_string();

        if is_form_urlencoded(&parts.headers) {
            let form = FormFields::parse(&bytes);
            let body_raw = Bytes::from(form.reconstruct());
            Self {
                form,
                entry: HistoryEntry::new(query_raw, body_raw),
            }
        } else {
            Self {
                form: FormFields::default(),
                entry: HistoryEntry::new(query_raw, bytes),
            }
        }
    }
}
