//! Core types and configuration for PaySign.
//!
//! This crate provides the foundational building blocks shared across the
//! PaySign signing and verification crates: the application [`Config`]
//! carrying the key material, the ordered case-insensitive [`HeaderSet`],
//! and the API [`Environment`] tag.

mod config;
mod error;
mod types;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use types::{Environment, HeaderSet};
