//! Inbound request authentication.
//!
//! Verification is a linear pipeline with no retries; every step's failure
//! is terminal and the caller must reject the message outright:
//!
//! 1. Parse the `Signature` header into its four components.
//! 2. Check the `Digest` header against the request body.
//! 3. Rebuild the canonical string using the header order declared inside
//!    the signature itself.
//! 4. Recover the signature plaintext with the configured private key and
//!    compare it against the canonical string.
//!
//! Step 4 deliberately decrypts with the verifier's *own* private key
//! (PKCS#1 v1.5) instead of verifying against a counterparty public key:
//! the counterparty encrypts the canonical string to the holder's public
//! key, so the scheme only authenticates when signer and verifier share
//! one keypair. This mirrors the wire protocol exactly and must not be
//! replaced with standard two-party signature verification.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use subtle::ConstantTimeEq;
use tracing::debug;

use paysign_core::{Config, HeaderSet};

use crate::canonical::{REQUEST_TARGET, build_signing_string};
use crate::digest::{Padding, digest_header_value, rsa_decrypt};
use crate::error::SignatureError;
use crate::keys::load_private_key;

/// The request target a webhook verifier expects to have received. There
/// is a single registered endpoint, so the value is fixed.
pub const WEBHOOK_REQUEST_TARGET: &str = "post /webhook";

/// The four components parsed out of a received `Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureComponents {
    /// Identifier naming which key the signer claims to have used.
    pub key_id: String,
    /// The declared signing algorithm.
    pub algorithm: String,
    /// Space-separated ordered list of signed header names.
    pub headers: String,
    /// Base64-encoded signature.
    pub signature: String,
}

/// Parse a `Signature` header value into its components.
///
/// The grammar is repeated `name="value"` pairs separated by commas
/// and/or whitespace. Values are scanned as quoted strings, so a value
/// may itself contain spaces (the `headers` component does). Keys are
/// matched case-insensitively; unknown keys are ignored and duplicate
/// keys keep the last value. All four of `keyId`, `algorithm`,
/// `headers`, and `signature` must be present.
///
/// # Errors
/// Returns [`SignatureError::MalformedSignature`] if any pair does not
/// match the grammar or a required component is missing.
pub fn parse_signature_header(value: &str) -> Result<SignatureComponents, SignatureError> {
    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut signature = None;

    let mut rest = skip_separators(value);
    while !rest.is_empty() {
        let eq = rest.find('=').ok_or(SignatureError::MalformedSignature(
            "expected name=\"value\" pair",
        ))?;
        let name = rest[..eq].trim_end();
        let after = rest[eq + 1..].trim_start();
        let body = after
            .strip_prefix('"')
            .ok_or(SignatureError::MalformedSignature(
                "component value must be double-quoted",
            ))?;
        let end = body.find('"').ok_or(SignatureError::MalformedSignature(
            "unterminated component value",
        ))?;
        let component = &body[..end];
        if component.is_empty() {
            return Err(SignatureError::MalformedSignature("empty component value"));
        }
        rest = skip_separators(&body[end + 1..]);

        let slot = match name {
            n if n.eq_ignore_ascii_case("keyId") => &mut key_id,
            n if n.eq_ignore_ascii_case("algorithm") => &mut algorithm,
            n if n.eq_ignore_ascii_case("headers") => &mut headers,
            n if n.eq_ignore_ascii_case("signature") => &mut signature,
            _ => continue,
        };
        *slot = Some(component.to_owned());
    }

    match (key_id, algorithm, headers, signature) {
        (Some(key_id), Some(algorithm), Some(headers), Some(signature)) => {
            Ok(SignatureComponents {
                key_id,
                algorithm,
                headers,
                signature,
            })
        }
        _ => Err(SignatureError::MalformedSignature(
            "missing required component",
        )),
    }
}

/// Advance past the comma/whitespace separators between pairs.
fn skip_separators(s: &str) -> &str {
    s.trim_start_matches(|c: char| c == ',' || c.is_whitespace())
}

/// Authenticate an inbound request.
///
/// On success the request is trusted and `Ok(())` is returned; any
/// failure means the caller must reject the message — no partial trust is
/// granted.
///
/// # Errors
/// - [`SignatureError::MissingSignatureHeader`] — no `Signature` header.
/// - [`SignatureError::MalformedSignature`] — the header does not parse
///   into its four required components (checked before any cryptography).
/// - [`SignatureError::DigestMismatch`] — the `Digest` header is absent
///   or does not match the body.
/// - [`SignatureError::MissingPrivateKey`] /
///   [`SignatureError::InvalidPrivateKey`] — unusable configuration.
/// - [`SignatureError::SignatureMismatch`] — the recovered plaintext does
///   not equal the canonical string, the signature is not valid Base64,
///   or the ciphertext does not decrypt.
pub fn authenticate(
    headers: &HeaderSet,
    body: &Value,
    config: &Config,
) -> Result<(), SignatureError> {
    let signature_header = headers
        .get("Signature")
        .ok_or(SignatureError::MissingSignatureHeader)?;
    let components = parse_signature_header(signature_header)?;

    debug!(key_id = %components.key_id, headers = %components.headers, "parsed signature header");

    // Digest check binds the body into the signed set.
    let expected_digest = digest_header_value(body);
    let provided_digest = headers.get("Digest").ok_or(SignatureError::DigestMismatch)?;
    if !bool::from(
        provided_digest
            .as_bytes()
            .ct_eq(expected_digest.as_bytes()),
    ) {
        debug!("digest mismatch");
        return Err(SignatureError::DigestMismatch);
    }

    let private_key_pem = config
        .private_key
        .as_deref()
        .ok_or(SignatureError::MissingPrivateKey)?;
    let private_key = load_private_key(private_key_pem)?;

    // Canonical reconstruction uses the order declared in the signature.
    let ordered_names: Vec<String> = components
        .headers
        .to_lowercase()
        .split_whitespace()
        .map(ToOwned::to_owned)
        .collect();

    let mut scratch = headers.clone();
    if ordered_names.iter().any(|name| name == REQUEST_TARGET) {
        scratch.insert(REQUEST_TARGET, WEBHOOK_REQUEST_TARGET);
    }
    let expected_payload = build_signing_string(&scratch, &ordered_names);

    let cipher = BASE64
        .decode(components.signature.as_bytes())
        .map_err(|_| SignatureError::SignatureMismatch)?;

    let plaintext = rsa_decrypt(&cipher, &private_key, Padding::Pkcs1v15)
        .map_err(|_| SignatureError::SignatureMismatch)?;

    if bool::from(plaintext.ct_eq(expected_payload.as_bytes())) {
        debug!(key_id = %components.key_id, "request authenticated");
        Ok(())
    } else {
        debug!("signature plaintext does not match canonical string");
        Err(SignatureError::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: &str = "keyId=\"app-1\",algorithm=\"rsa-sha256\",\
        headers=\"date digest x-request-id\",signature=\"c2ln\"";

    #[test]
    fn test_should_parse_all_four_components() {
        let components = parse_signature_header(FULL_HEADER).unwrap();
        assert_eq!(components.key_id, "app-1");
        assert_eq!(components.algorithm, "rsa-sha256");
        assert_eq!(components.headers, "date digest x-request-id");
        assert_eq!(components.signature, "c2ln");
    }

    #[test]
    fn test_should_match_component_names_case_insensitively() {
        let header = "KEYID=\"a\",Algorithm=\"rsa-sha256\",HeAdErS=\"date\",SIGNATURE=\"c2ln\"";
        let components = parse_signature_header(header).unwrap();
        assert_eq!(components.key_id, "a");
    }

    #[test]
    fn test_should_parse_whitespace_separated_pairs() {
        let header = "keyId=\"a\" algorithm=\"rsa-sha256\" \
            headers=\"date digest x-request-id\" signature=\"c2ln\"";
        let components = parse_signature_header(header).unwrap();
        assert_eq!(components.key_id, "a");
        assert_eq!(components.headers, "date digest x-request-id");
        assert_eq!(components.signature, "c2ln");
    }

    #[test]
    fn test_should_reject_unterminated_component_value() {
        let result = parse_signature_header("keyId=\"a");
        assert!(matches!(result, Err(SignatureError::MalformedSignature(_))));
    }

    #[test]
    fn test_should_tolerate_whitespace_between_pairs() {
        let header =
            "keyId=\"a\" , algorithm = \"rsa-sha256\", headers=\"date\", signature=\"c2ln\"";
        let components = parse_signature_header(header).unwrap();
        assert_eq!(components.algorithm, "rsa-sha256");
    }

    #[test]
    fn test_should_reject_missing_algorithm_component() {
        let header = "keyId=\"a\",headers=\"date\",signature=\"c2ln\"";
        let result = parse_signature_header(header);
        assert!(matches!(result, Err(SignatureError::MalformedSignature(_))));
    }

    #[test]
    fn test_should_reject_unquoted_component_value() {
        let result = parse_signature_header("keyId=a");
        assert!(matches!(result, Err(SignatureError::MalformedSignature(_))));
    }

    #[test]
    fn test_should_reject_empty_component_value() {
        let result = parse_signature_header("keyId=\"\"");
        assert!(matches!(result, Err(SignatureError::MalformedSignature(_))));
    }

    #[test]
    fn test_should_ignore_unknown_components() {
        let header = format!("{FULL_HEADER},created=\"123\"");
        let components = parse_signature_header(&header).unwrap();
        assert_eq!(components.key_id, "app-1");
    }

    #[test]
    fn test_should_keep_last_value_for_duplicate_keys() {
        let header = format!("{FULL_HEADER},keyId=\"app-2\"");
        let components = parse_signature_header(&header).unwrap();
        assert_eq!(components.key_id, "app-2");
    }

    #[test]
    fn test_should_preserve_base64_padding_in_signature_value() {
        let header = "keyId=\"a\",algorithm=\"rsa-sha256\",headers=\"date\",signature=\"c2lnbg==\"";
        let components = parse_signature_header(header).unwrap();
        assert_eq!(components.signature, "c2lnbg==");
    }

    #[test]
    fn test_should_fail_authentication_before_crypto_on_malformed_signature() {
        // Header missing the algorithm component; no key is configured, so
        // reaching any later step would surface MissingPrivateKey instead.
        let headers: HeaderSet = [
            ("Signature", "keyId=\"a\",headers=\"date\",signature=\"c2ln\""),
            ("Digest", "SHA-256=whatever"),
        ]
        .into_iter()
        .collect();
        let config = Config {
            app_id: "a".to_owned(),
            private_key: None,
            env: paysign_core::Environment::Sandbox,
        };

        let result = authenticate(&headers, &serde_json::json!({}), &config);
        assert!(matches!(result, Err(SignatureError::MalformedSignature(_))));
    }

    #[test]
    fn test_should_fail_authentication_without_signature_header() {
        let headers = HeaderSet::new();
        let config = Config::new("a", "pem");
        let result = authenticate(&headers, &serde_json::json!({}), &config);
        assert!(matches!(result, Err(SignatureError::MissingSignatureHeader)));
    }
}
