//! Canonical signing string construction.
//!
//! The canonical string is the exact byte sequence that is signed on the
//! outbound path and checked on the inbound path: for each header name in
//! a given order, one `"<lowercased name>: <value>"` line, joined with
//! `\n`. The output is deterministic for a given header set and order, and
//! order-sensitive by construction.

use paysign_core::HeaderSet;

/// Pseudo-header naming the request line. It is never a real transport
/// header: whichever side wants it signed inserts the synthesized value
/// (for example `"post /webhook"`) into the header set first.
pub const REQUEST_TARGET: &str = "(request-target)";

/// Build the canonical signing string for the given header order.
///
/// Names are matched case-insensitively against the header set and
/// lowercased in the output; names absent from the set are silently
/// skipped on both the signing and the verification path. Values are
/// emitted verbatim, with no trimming or escaping.
///
/// # Examples
///
/// ```
/// use paysign_auth::canonical::build_signing_string;
/// use paysign_core::HeaderSet;
///
/// let headers: HeaderSet = [("Date", "Mon, 01 Jan 2024 00:00:00 GMT")]
///     .into_iter()
///     .collect();
/// let s = build_signing_string(&headers, &["Date", "Digest"]);
/// assert_eq!(s, "date: Mon, 01 Jan 2024 00:00:00 GMT");
/// ```
#[must_use]
pub fn build_signing_string<S: AsRef<str>>(headers: &HeaderSet, ordered_names: &[S]) -> String {
    ordered_names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            headers
                .get(name)
                .map(|value| format!("{}: {value}", name.to_lowercase()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The lowercase names from `ordered_names` that are actually present in
/// the header set, in order. This is what goes into the `headers=`
/// signature component.
#[must_use]
pub fn signed_header_names<S: AsRef<str>>(headers: &HeaderSet, ordered_names: &[S]) -> Vec<String> {
    ordered_names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| headers.contains(name))
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_headers() -> HeaderSet {
        [
            ("Date", "Mon, 01 Jan 2024 00:00:00 GMT"),
            ("Digest", "SHA-256=abc"),
            ("X-Request-ID", "abc-123"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_should_join_lowercased_lines_in_given_order() {
        let s = build_signing_string(&sample_headers(), &["date", "digest", "x-request-id"]);
        assert_eq!(
            s,
            "date: Mon, 01 Jan 2024 00:00:00 GMT\ndigest: SHA-256=abc\nx-request-id: abc-123"
        );
    }

    #[test]
    fn test_should_be_deterministic() {
        let headers = sample_headers();
        let order = ["Digest", "Date"];
        assert_eq!(
            build_signing_string(&headers, &order),
            build_signing_string(&headers, &order)
        );
    }

    #[test]
    fn test_should_be_order_sensitive() {
        let headers = sample_headers();
        assert_ne!(
            build_signing_string(&headers, &["Date", "Digest"]),
            build_signing_string(&headers, &["Digest", "Date"])
        );
    }

    #[test]
    fn test_should_skip_absent_names_silently() {
        let s = build_signing_string(&sample_headers(), &["date", "authorization", "digest"]);
        assert_eq!(s, "date: Mon, 01 Jan 2024 00:00:00 GMT\ndigest: SHA-256=abc");
    }

    #[test]
    fn test_should_match_names_case_insensitively() {
        let s = build_signing_string(&sample_headers(), &["X-REQUEST-ID"]);
        assert_eq!(s, "x-request-id: abc-123");
    }

    #[test]
    fn test_should_preserve_value_whitespace_verbatim() {
        let headers: HeaderSet = [("X-Note", "  spaced   out  ")].into_iter().collect();
        let s = build_signing_string(&headers, &["X-Note"]);
        assert_eq!(s, "x-note:   spaced   out  ");
    }

    #[test]
    fn test_should_list_present_names_lowercased_in_order() {
        let names = signed_header_names(
            &sample_headers(),
            &["(request-target)", "Date", "Digest", "X-Request-ID"],
        );
        assert_eq!(names, vec!["date", "digest", "x-request-id"]);
    }

    #[test]
    fn test_should_include_request_target_when_inserted() {
        let mut headers = sample_headers();
        headers.insert(REQUEST_TARGET, "post /webhook");
        let s = build_signing_string(&headers, &[REQUEST_TARGET, "date"]);
        assert!(s.starts_with("(request-target): post /webhook\n"));
    }
}
