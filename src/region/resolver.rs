//! Region key derivation.

use std::net::SocketAddr;

use axum::http::HeaderMap;

use crate::config::{AdminConfig, RegionConfig};

/// Which region a request is served from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionTarget {
    /// The fixed region holding the admin operations.
    Admin,
    /// A client region identified by its key.
    Client(String),
}

/// Pure function of a request: path, headers and peer address.
#[derive(Debug, Clone)]
pub struct RegionResolver {
    admin_prefix: String,
    identity_header: String,
}

impl RegionResolver {
    pub fn new(admin: &AdminConfig, region: &RegionConfig) -> Self {
        Self {
            admin_prefix: admin.path_prefix.clone(),
            identity_header: region.identity_header.clone(),
        }
    }

    pub fn resolve(&self, path: &str, headers: &HeaderMap, remote_addr: &str) -> RegionTarget {
        if path.starts_with(&self.admin_prefix) {
            RegionTarget::Admin
        } else {
            RegionTarget::Client(self.client_key(headers, remote_addr))
        }
    }

    /// Client key of the caller, ignoring the admin prefix. Admin operations
    /// use this to find the region they act on.
    pub fn client_key(&self, headers: &HeaderMap, remote_addr: &str) -> String {
        headers
            .get(self.identity_header.as_str())
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| strip_port(remote_addr))
    }
}

/// Drop the port from a peer address.
///
/// Socket addresses keep their full IP (IPv6 included); other text is cut at
/// the first colon, and text without a colon is used whole.
pub fn strip_port(remote_addr: &str) -> String {
    if let Ok(addr) = remote_addr.parse::<SocketAddr>() {
        return addr.ip().to_string();
    }
    match remote_addr.find(':') {
        Some(idx) => remote_addr[..idx].to_string(),
        None => remote_addr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn resolver() -> RegionResolver {
        RegionResolver::new(&AdminConfig::default(), &RegionConfig::default())
    }

    #[test]
    fn admin_prefix_wins_over_identity() {
        let mut headers = HeaderMap::new();
        headers.insert("mock-from", HeaderValue::from_static("tenant-a"));

        assert_eq!(
            resolver().resolve("/internal/add", &headers, "10.0.0.1:5000"),
            RegionTarget::Admin
        );
    }

    #[test]
    fn identity_header_overrides_address() {
        let mut headers = HeaderMap::new();
        headers.insert("Mock-From", HeaderValue::from_static("tenant-a"));

        assert_eq!(
            resolver().resolve("/api", &headers, "10.0.0.1:5000"),
            RegionTarget::Client("tenant-a".into())
        );
    }

    #[test]
    fn empty_identity_header_falls_back_to_address() {
        let mut headers = HeaderMap::new();
        headers.insert("mock-from", HeaderValue::from_static(""));

        assert_eq!(
            resolver().resolve("/api", &headers, "10.0.0.1:5000"),
            RegionTarget::Client("10.0.0.1".into())
        );
    }

    #[test]
    fn client_key_ignores_admin_prefix() {
        let headers = HeaderMap::new();
        assert_eq!(resolver().client_key(&headers, "192.168.1.9:80"), "192.168.1.9");
    }

    #[test]
    fn strip_port_variants() {
        assert_eq!(strip_port("127.0.0.1:8080"), "127.0.0.1");
        assert_eq!(strip_port("[::1]:8080"), "::1");
        assert_eq!(strip_port("host:1:2"), "host");
        assert_eq!(strip_port("unix-socket"), "unix-socket");
        assert_eq!(strip_port(""), "");
    }

    #[test]
    fn custom_header_name() {
        let resolver = RegionResolver::new(
            &AdminConfig::default(),
            &RegionConfig {
                identity_header: "X-Tenant".into(),
            },
        );
        let mut headers = HeaderMap::new();
        headers.insert("mock-from", HeaderValue::from_static("ignored"));
        headers.insert("x-tenant", HeaderValue::from_static("t1"));

        assert_eq!(resolver.client_key(&headers, "1.2.3.4:1"), "t1");
    }
}
