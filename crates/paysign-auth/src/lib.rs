//! HTTP-Signature-style message signing and verification for PaySign.
//!
//! This crate implements both directions of the signature scheme used
//! between a client application and the financial API:
//!
//! - **Outbound**: build a canonical signing string from a fixed, ordered
//!   set of request headers, sign it with RSA-SHA256, and package the
//!   result as a `Signature` header value
//!   (`keyId="..",algorithm="rsa-sha256",headers="..",signature=".."`).
//! - **Inbound**: authenticate a received webhook request by parsing its
//!   `Signature` header, checking the `Digest` header against the request
//!   body, reconstructing the canonical string from the declared header
//!   order, and checking the signature against it.
//!
//! All operations are synchronous and stateless; every sign or verify call
//! works only on its own arguments and no key material is ever retained or
//! logged.
//!
//! # Modules
//!
//! - [`canonical`] - Canonical signing string construction
//! - [`digest`] - SHA-256/Base64 digest and RSA decrypt helpers
//! - [`error`] - Signature error taxonomy
//! - [`headers`] - Outbound request header construction
//! - [`keys`] - PEM private key loading
//! - [`sign`] - Outbound signature header construction
//! - [`verify`] - Inbound request authentication

pub mod canonical;
pub mod digest;
pub mod error;
pub mod headers;
pub mod keys;
pub mod sign;
pub mod verify;

pub use canonical::{REQUEST_TARGET, build_signing_string, signed_header_names};
pub use digest::{Padding, body_digest, digest_header_value, rsa_decrypt, sha256_base64};
pub use error::SignatureError;
pub use headers::build_request_headers;
pub use keys::load_private_key;
pub use sign::{
    DEFAULT_ALGORITHM, SIGNED_HEADERS, SigningPayload, build_signature_header, sign_payload,
};
pub use verify::{
    SignatureComponents, WEBHOOK_REQUEST_TARGET, authenticate, parse_signature_header,
};
