//! Digest and asymmetric-decrypt helpers.
//!
//! The `Digest` header binds the request body into the signed header set:
//! the body's key/value pairs are serialized as
//! `application/x-www-form-urlencoded`, hashed with SHA-256, and
//! Base64-encoded under a `SHA-256=` tag. The decrypt helper wraps the RSA
//! decrypt primitive with an explicit padding mode; the two modes are not
//! interchangeable and must match whatever the producer used.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey};
use serde_json::Value;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::SignatureError;

/// Algorithm tag carried in front of the Base64 digest in the `Digest`
/// header.
pub const DIGEST_PREFIX: &str = "SHA-256=";

/// RSA decrypt padding modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// OAEP with a SHA-1 mask, as produced by a default Node
    /// `privateDecrypt`/`publicEncrypt` pair.
    Oaep,
    /// PKCS#1 v1.5, used by the inbound signature check.
    Pkcs1v15,
}

/// Compute the Base64-encoded SHA-256 digest of a byte string.
///
/// # Examples
///
/// ```
/// use paysign_auth::digest::sha256_base64;
///
/// assert_eq!(
///     sha256_base64(b""),
///     "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
/// );
/// ```
#[must_use]
pub fn sha256_base64(data: &[u8]) -> String {
    BASE64.encode(Sha256::digest(data))
}

/// Serialize a JSON body's own key/value pairs as
/// `application/x-www-form-urlencoded`, preserving the body's key order.
///
/// Scalar values are rendered in their JSON text form without quotes
/// (`"1"` and `1` both become `1`); nested arrays and objects are rendered
/// as compact JSON text. Non-object bodies serialize to the empty string.
#[must_use]
pub fn form_encode(body: &Value) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(object) = body.as_object() {
        for (key, value) in object {
            serializer.append_pair(key, &scalar_text(value));
        }
    }
    serializer.finish()
}

/// Compute the Base64 SHA-256 digest of a body's form-urlencoded
/// serialization (the value carried after the `SHA-256=` tag).
#[must_use]
pub fn body_digest(body: &Value) -> String {
    sha256_base64(form_encode(body).as_bytes())
}

/// The full `Digest` header value for a body: `SHA-256=<base64>`.
#[must_use]
pub fn digest_header_value(body: &Value) -> String {
    format!("{DIGEST_PREFIX}{}", body_digest(body))
}

/// Decrypt a ciphertext with an RSA private key under the given padding
/// mode.
///
/// # Errors
/// Returns [`SignatureError::DecryptionFailed`] if the primitive rejects
/// the ciphertext.
pub fn rsa_decrypt(
    cipher: &[u8],
    key: &RsaPrivateKey,
    padding: Padding,
) -> Result<Vec<u8>, SignatureError> {
    match padding {
        Padding::Oaep => key.decrypt(Oaep::new::<Sha1>(), cipher),
        Padding::Pkcs1v15 => key.decrypt(Pkcs1v15Encrypt, cipher),
    }
    .map_err(|_| SignatureError::DecryptionFailed)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
