//! Response-construction scripts.
//!
//! # Data Flow
//! ```text
//! admin add (cmd = base64 text)
//!     → Script::decode (base64 → lines → parser.rs)
//!     → Script { directives } stored on the route
//!
//! matched request
//!     → Script::render (render.rs)
//!     → ResponseDescription → axum Response
//! ```
//!
//! # Script Format
//! One directive per line, tokens separated by single spaces:
//! ```text
//! res_code 201
//! res_header X-Test ok
//! res_body hello
//! ```
//!
//! # Design Decisions
//! - Scripts are parsed once, when registered; replay never re-parses
//! - Every malformed line is a terminal error, so a stored script always renders
//! - Unknown directives are ignored

mod parser;
mod render;

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use base64::Engine;
use thiserror::Error;

pub use render::ResponseDescription;

/// A single parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `res_header <name> <value>`
    Header(HeaderName, HeaderValue),
    /// `res_code <code>`
    Status(StatusCode),
    /// `res_body <value>`
    Body(Bytes),
}

/// Why a script was rejected. The display text is what clients see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("cmd is not valid base64")]
    Encoding,
    #[error("cmd res_header format error")]
    Header,
    #[error("cmd res_code format error")]
    Code,
    #[error("cmd res_body format error")]
    Body,
}

/// A decoded, validated response-construction script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    directives: Vec<Directive>,
}

impl Script {
    /// Decode a base64 (standard alphabet, padded) script and parse it.
    /// Line breaks inside the encoded text are ignored.
    pub fn decode(encoded: &str) -> Result<Self, ScriptError> {
        let compact: Vec<u8> = encoded
            .trim()
            .bytes()
            .filter(|b| !matches!(b, b'\r' | b'\n'))
            .collect();
        let text = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|_| ScriptError::Encoding)?;
        Self::parse(&text)
    }

    /// Parse raw script text.
    pub fn parse(text: &[u8]) -> Result<Self, ScriptError> {
        let mut directives = Vec::new();
        for line in text.split(|&b| b == b'\n') {
            if let Some(directive) = parser::parse_line(line)? {
                directives.push(directive);
            }
        }
        Ok(Self { directives })
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Apply every directive in order and produce the response to send.
    pub fn render(&self) -> ResponseDescription {
        let mut description = ResponseDescription::default();
        for directive in &self.directives {
            description.apply(directive);
        }
        description
    }
}
