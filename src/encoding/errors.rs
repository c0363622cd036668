use std::io;

use thiserror::Error;

/// Represents the outer-level, user-facing errors of the composer calldata encoding package.
///
/// Variants:
/// - `InvalidInput`: The encoding was rejected because the inputs violate a structural
///   precondition of the frame (conflicting branch markers, a forbidden pay config, mismatched
///   packed types and values, a malformed market blob...). Nothing is emitted in that case.
/// - `FatalError`: There is a problem with the setup around the encoders, such as an unreadable
///   catalog or fixture file or an unknown function name.
///
/// There is no recoverable variant: encoders never perform I/O, so every failure is a
/// deterministic function of the inputs.
#[derive(Error, Debug, PartialEq)]
pub enum EncodingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fatal error: {0}")]
    FatalError(String),
}

impl From<io::Error> for EncodingError {
    fn from(err: io::Error) -> Self {
        EncodingError::FatalError(err.to_string())
    }
}

impl From<serde_json::Error> for EncodingError {
    fn from(err: serde_json::Error) -> Self {
        EncodingError::FatalError(err.to_string())
    }
}
