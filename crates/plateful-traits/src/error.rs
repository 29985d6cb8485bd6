//! Error types for the profile module

use thiserror::Error;

/// Profile module error types
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("no authenticated user")]
    Unauthenticated,

    #[error("image encoding failed: {0}")]
    Encoding(String),

    #[error("remote transport error: {0}")]
    Transport(String),

    #[error("remote object not found: {0}")]
    NotFound(String),

    #[error("malformed remote document: {0}")]
    Malformed(String),

    #[error("image decoding failed: {0}")]
    Decode(String),
}

/// Result type alias for profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;
