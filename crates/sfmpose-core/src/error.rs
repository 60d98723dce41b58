//! Error types for sfmpose-rs.
//!
//! Only [`SfmError`] aborts a conversion. [`CoercionError`] and
//! [`ResolutionError`] are scoped to one view or one field and end up as
//! [`Diagnostic`](crate::Diagnostic)s.

use thiserror::Error;

/// The main error type for sfmpose-rs operations.
#[derive(Error, Debug)]
pub enum SfmError {
    /// The input document does not match the SfM schema.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Two poses share an identifier and the options ask for rejection.
    #[error("duplicate pose id '{0}'")]
    DuplicatePoseId(String),

    /// Conversion options could not be loaded.
    #[error("invalid options: {0}")]
    ConfigError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for sfmpose-rs operations.
pub type Result<T> = std::result::Result<T, SfmError>;

/// A text token that could not be turned into the expected number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// The token was empty.
    #[error("empty value")]
    Empty,

    /// The token is not a base-10 integer in range.
    #[error("invalid integer '{token}': {reason}")]
    InvalidInt { token: String, reason: String },

    /// The token is not a decimal floating-point number.
    #[error("invalid float '{token}': {reason}")]
    InvalidFloat { token: String, reason: String },

    /// The token parsed, but to infinity or NaN.
    #[error("non-finite value '{0}'")]
    NonFinite(String),

    /// The component is absent from its array.
    #[error("missing component {index} (array has {len})")]
    Missing { index: usize, len: usize },
}

/// A view referencing a pose that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No pose carries the referenced identifier.
    #[error("cannot find pose '{0}'")]
    UnknownPose(String),
}
