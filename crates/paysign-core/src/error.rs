//! Error types for the PaySign core.

/// Core error type for PaySign configuration and shared types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for PaySign core operations.
pub type CoreResult<T> = Result<T, CoreError>;
