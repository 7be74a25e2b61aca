//! Line-level directive parsing.

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, StatusCode};

use super::{Directive, ScriptError};

const RES_HEADER: &[u8] = b"res_header";
const RES_CODE: &[u8] = b"res_code";
const RES_BODY: &[u8] = b"res_body";

/// Parse one line. `Ok(None)` for blank lines and unknown directives.
pub(super) fn parse_line(line: &[u8]) -> Result<Option<Directive>, ScriptError> {
    let line = trim(line);
    if line.is_empty() {
        return Ok(None);
    }

    // Single-space split: doubled spaces yield empty tokens that count toward arity.
    let tokens: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
    let head = tokens[0];

    if head.starts_with(RES_HEADER) {
        parse_header(&tokens).map(Some)
    } else if head.starts_with(RES_CODE) {
        parse_code(&tokens).map(Some)
    } else if head.starts_with(RES_BODY) {
        parse_body(&tokens).map(Some)
    } else {
        Ok(None)
    }
}

/// Strip every byte <= b' ' from both ends.
fn trim(line: &[u8]) -> &[u8] {
    let start = line.iter().position(|&b| b > b' ').unwrap_or(line.len());
    let end = line.iter().rposition(|&b| b > b' ').map_or(start, |i| i + 1);
    &line[start..end]
}

fn parse_header(tokens: &[&[u8]]) -> Result<Directive, ScriptError> {
    let [_, name, value] = tokens else {
        return Err(ScriptError::Header);
    };
    let name = HeaderName::from_bytes(name).map_err(|_| ScriptError::Header)?;
    let value = HeaderValue::from_bytes(value).map_err(|_| ScriptError::Header)?;
    Ok(Directive::Header(name, value))
}

fn parse_code(tokens: &[&[u8]]) -> Result<Directive, ScriptError> {
    let [_, code] = tokens else {
        return Err(ScriptError::Code);
    };
    let code: i64 = std::str::from_utf8(code)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(ScriptError::Code)?;
    let code = u16::try_from(code).map_err(|_| ScriptError::Code)?;
    StatusCode::from_u16(code)
        .map(Directive::Status)
        .map_err(|_| ScriptError::Code)
}

fn parse_body(tokens: &[&[u8]]) -> Result<Directive, ScriptError> {
    let [_, body] = tokens else {
        return Err(ScriptError::Body);
    };
    Ok(Directive::Body(Bytes::copy_from_slice(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_strips_control_bytes() {
        assert_eq!(trim(b" \t res_code 200\r\x00"), b"res_code 200");
        assert_eq!(trim(b" \r\n\t"), b"");
        assert_eq!(trim(b""), b"");
    }

    #[test]
    fn blank_and_unknown_lines_are_skipped() {
        assert_eq!(parse_line(b"   ").unwrap(), None);
        assert_eq!(parse_line(b"res_delay 100").unwrap(), None);
        assert_eq!(parse_line(b"# comment").unwrap(), None);
    }

    #[test]
    fn directive_names_match_by_prefix() {
        assert_eq!(
            parse_line(b"res_codeX 418").unwrap(),
            Some(Directive::Status(StatusCode::IM_A_TEAPOT))
        );
    }

    #[test]
    fn header_arity_is_exact() {
        assert_eq!(parse_line(b"res_header X-A").unwrap_err(), ScriptError::Header);
        assert_eq!(
            parse_line(b"res_header X-A a b").unwrap_err(),
            ScriptError::Header
        );
        // Two spaces produce an empty token.
        assert_eq!(
            parse_line(b"res_header  X-A a").unwrap_err(),
            ScriptError::Header
        );
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        assert_eq!(
            parse_line(b"res_header X(A) a").unwrap_err(),
            ScriptError::Header
        );
    }

    #[test]
    fn code_must_be_an_http_status() {
        assert_eq!(parse_line(b"res_code").unwrap_err(), ScriptError::Code);
        assert_eq!(parse_line(b"res_code 2o1").unwrap_err(), ScriptError::Code);
        assert_eq!(parse_line(b"res_code 42").unwrap_err(), ScriptError::Code);
        assert_eq!(parse_line(b"res_code -200").unwrap_err(), ScriptError::Code);
        assert_eq!(
            parse_line(b"res_code +201").unwrap(),
            Some(Directive::Status(StatusCode::CREATED))
        );
    }

    #[test]
    fn body_is_a_single_token() {
        assert_eq!(parse_line(b"res_body").unwrap_err(), ScriptError::Body);
        assert_eq!(parse_line(b"res_body a b").unwrap_err(), ScriptError::Body);
        assert_eq!(
            parse_line(b"res_body {\"ok\":true}").unwrap(),
            Some(Directive::Body(Bytes::from_static(b"{\"ok\":true}")))
        );
    }
}
