//! Response descriptions produced by scripts.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::Directive;

/// Headers, status and body accumulated from a script.
///
/// Header keys are unique (last write wins) and carry no order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDescription {
    headers: HeaderMap,
    status: StatusCode,
    body: Bytes,
}

impl Default for ResponseDescription {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            status: StatusCode::OK,
            body: Bytes::new(),
        }
    }
}

impl ResponseDescription {
    pub(super) fn apply(&mut self, directive: &Directive) {
        match directive {
            Directive::Header(name, value) => {
                self.headers.insert(name.clone(), value.clone());
            }
            Directive::Status(code) => self.status = *code,
            Directive::Body(body) => self.body = body.clone(),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl IntoResponse for ResponseDescription {
    /// Headers, then status, then body, each written once.
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::empty());
        *response.headers_mut() = self.headers;
        *response.status_mut() = self.status;
        *response.body_mut() = Body::from(self.body);
        response
    }
}
