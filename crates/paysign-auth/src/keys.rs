//! PEM private key loading.

use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;

use crate::error::SignatureError;

/// Parse a PEM-encoded RSA private key.
///
/// Accepts PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1
/// (`BEGIN RSA PRIVATE KEY`) encodings. The key material is read-only
/// input; it is never logged or persisted.
///
/// # Errors
/// Returns [`SignatureError::InvalidPrivateKey`] if the text parses as
/// neither encoding.
pub fn load_private_key(pem: &str) -> Result<RsaPrivateKey, SignatureError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| SignatureError::InvalidPrivateKey(e.to_string()))
}
