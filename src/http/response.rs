//! Fixed responses produced by the dispatcher itself.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Body of every unmatched request.
pub const NOT_FOUND_BODY: &str = "404";

pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

pub fn unreadable_body() -> Response {
    (StatusCode::BAD_REQUEST, "failed to read request body").into_response()
}
