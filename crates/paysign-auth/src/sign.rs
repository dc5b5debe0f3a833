//! Outbound signature header construction.
//!
//! The signed header order is fixed by [`SIGNED_HEADERS`]; callers never
//! choose it per call. Headers absent from the request are silently left
//! out of both the canonical string and the `headers=` component.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use serde_json::Value;
use sha2::Sha256;
use tracing::debug;

use paysign_core::{Config, HeaderSet};

use crate::canonical::{build_signing_string, signed_header_names};
use crate::error::SignatureError;
use crate::keys::load_private_key;

/// The only signing algorithm this implementation supports, and the
/// default callers should pass when nothing else is mandated.
pub const DEFAULT_ALGORITHM: &str = "rsa-sha256";

/// Fixed, ordered list of header names that participate in outbound
/// signing when present on the request.
pub const SIGNED_HEADERS: &[&str] = &["(request-target)", "Date", "Digest", "X-Request-ID"];

/// A payload handed to [`sign_payload`].
///
/// JSON payloads are serialized to their compact text form before
/// signing; text payloads are signed byte-for-byte.
#[derive(Debug, Clone, Copy)]
pub enum SigningPayload<'a> {
    /// Sign the string as-is.
    Text(&'a str),
    /// Serialize the value to compact JSON text, then sign.
    Json(&'a Value),
}

impl SigningPayload<'_> {
    fn to_text(self) -> String {
        match self {
            Self::Text(s) => s.to_owned(),
            Self::Json(v) => v.to_string(),
        }
    }
}

/// Sign a payload with RSA-SHA256 (PKCS#1 v1.5) and return the Base64
/// signature.
///
/// The algorithm is an explicit parameter and must be exactly
/// [`DEFAULT_ALGORITHM`]; any other value is rejected before the key
/// material is touched.
///
/// # Errors
/// Returns [`SignatureError::UnsupportedAlgorithm`] for any algorithm
/// other than `rsa-sha256`, [`SignatureError::InvalidPrivateKey`] if the
/// PEM does not parse, or [`SignatureError::Signing`] if the sign
/// primitive itself fails.
pub fn sign_payload(
    payload: SigningPayload<'_>,
    private_key_pem: &str,
    algorithm: &str,
) -> Result<String, SignatureError> {
    if algorithm != DEFAULT_ALGORITHM {
        return Err(SignatureError::UnsupportedAlgorithm(algorithm.to_owned()));
    }

    let private_key = load_private_key(private_key_pem)?;
    let signing_key = SigningKey::<Sha256>::new(private_key);

    let text = payload.to_text();
    let signature = signing_key
        .try_sign(text.as_bytes())
        .map_err(|e| SignatureError::Signing(e.to_string()))?;

    Ok(BASE64.encode(signature.to_vec()))
}

/// Build the `Signature` header value for an outbound request.
///
/// Canonicalizes the headers from [`SIGNED_HEADERS`] that are present,
/// signs the canonical string with the configured private key, and
/// formats the four components:
///
/// ```text
/// keyId="<app_id>",algorithm="rsa-sha256",headers="<space-joined names>",signature="<base64>"
/// ```
///
/// # Errors
/// Returns [`SignatureError::MissingPrivateKey`] when the configuration
/// carries no key, or any error from [`sign_payload`].
pub fn build_signature_header(
    headers: &HeaderSet,
    config: &Config,
) -> Result<String, SignatureError> {
    let private_key = config
        .private_key
        .as_deref()
        .ok_or(SignatureError::MissingPrivateKey)?;

    let signing_string = build_signing_string(headers, SIGNED_HEADERS);
    let header_names = signed_header_names(headers, SIGNED_HEADERS).join(" ");

    debug!(headers = %header_names, "building signature header");

    let signature = sign_payload(
        SigningPayload::Text(&signing_string),
        private_key,
        DEFAULT_ALGORITHM,
    )?;

    Ok(format!(
        "keyId=\"{}\",algorithm=\"{DEFAULT_ALGORITHM}\",headers=\"{header_names}\",signature=\"{signature}\"",
        config.app_id
    ))
}
