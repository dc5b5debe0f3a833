//! Outbound request header construction.
//!
//! Builds the header set the transport layer sends alongside the
//! `Signature` header: `Date`, a fresh `X-Request-ID`, the body `Digest`
//! when there is a body, and the `(request-target)` pseudo-header.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use paysign_core::HeaderSet;

use crate::canonical::REQUEST_TARGET;
use crate::digest::digest_header_value;

/// Generate a request identifier: a UUID v4 with the dashes stripped.
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Build the headers for an outbound request.
///
/// Produces `(request-target)` (`"<lowercased method> <path>"`), `Date`
/// (RFC 7231), `X-Request-ID`, and, when a body is supplied, `Digest`
/// (`SHA-256=<base64>`). The result is what
/// [`build_signature_header`](crate::sign::build_signature_header) signs.
#[must_use]
pub fn build_request_headers(method: &str, path: &str, body: Option<&Value>) -> HeaderSet {
    let mut headers = HeaderSet::new();
    headers.insert(
        REQUEST_TARGET,
        format!("{} {path}", method.to_lowercase()),
    );
    headers.insert(
        "Date",
        Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
    );
    headers.insert("X-Request-ID", generate_request_id());
    if let Some(body) = body {
        headers.insert("Digest", digest_header_value(body));
    }
    headers
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_strip_dashes_from_request_id() {
        let id = generate_request_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_should_build_headers_with_request_target_and_date() {
        let headers = build_request_headers("POST", "/pis/v2/payments", None);
        assert_eq!(
            headers.get(REQUEST_TARGET),
            Some("post /pis/v2/payments")
        );
        assert!(headers.get("Date").unwrap().ends_with(" GMT"));
        assert!(headers.contains("X-Request-ID"));
        assert!(!headers.contains("Digest"));
    }

    #[test]
    fn test_should_add_digest_for_body() {
        let headers = build_request_headers("post", "/webhook", Some(&json!({"a": "1"})));
        assert_eq!(
            headers.get("Digest"),
            Some("SHA-256=wi/qXXQo5c9H72NUyXySI8ldbc3D4NIwD/eQVrH/PYU=")
        );
    }
}
