//! Error types for signing and verification.
//!
//! Every failure is terminal for the current call: nothing is retried and
//! no partial signature or partial verification is ever returned. Callers
//! surface these as outright rejection of the outbound build or the inbound
//! authentication attempt.

/// Errors that can occur while building or verifying a message signature.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// No private key is configured.
    #[error("private_key must be set")]
    MissingPrivateKey,

    /// The configured private key is not valid PKCS#8 or PKCS#1 PEM.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// A signing algorithm other than `rsa-sha256` was requested.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The request carries no `Signature` header.
    #[error("missing Signature header")]
    MissingSignatureHeader,

    /// The `Signature` header could not be parsed into its four required
    /// components.
    #[error("malformed signature header: {0}")]
    MalformedSignature(&'static str),

    /// The `Digest` header does not match the request body.
    #[error("digest does not match request body")]
    DigestMismatch,

    /// The signature does not match the canonical string.
    #[error("signature does not match")]
    SignatureMismatch,

    /// The underlying cryptographic sign operation failed.
    #[error("error during signing: {0}")]
    Signing(String),

    /// The asymmetric decrypt primitive failed.
    #[error("decryption failed")]
    DecryptionFailed,
}
