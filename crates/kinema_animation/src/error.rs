//! Animation error types

use thiserror::Error;

/// Errors raised while building animations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The value blender has no way to interpolate its value pair
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// The configuration cannot produce a working animation
    #[error("Invalid animation configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
