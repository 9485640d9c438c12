//! Errors returned by `btrf` operations.

use thiserror::Error;

/// Errors returned by `btrf` operations.
#[derive(Error, Debug)]
pub enum BtrError {
    /// A file could not be opened, read, or does not satisfy size/access
    /// preconditions (missing path, permission denied, short read).
    #[error("File error: {0}")]
    File(String),

    /// Record-size detection produced zero candidates, or an extractor
    /// invariant was violated.
    #[error("Data error: {0}")]
    Data(String),

    /// A caller-supplied parameter failed validation (e.g. `record_size <=
    /// 0`, an unsupported export format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An invalid CLI argument or argument combination was supplied.
    #[error("Argument error: {0}")]
    Argument(String),

    /// The user interrupted a long-running operation (Ctrl+C).
    #[error("Cancelled by user")]
    Cancelled,
}

impl BtrError {
    /// Map an error to the process exit code it should produce, per the
    /// taxonomy in the specification (file=2, data=3, validation=5,
    /// argument/configuration=4, cancellation=130).
    pub fn exit_code(&self) -> i32 {
        match self {
            BtrError::File(_) => 2,
            BtrError::Data(_) => 3,
            BtrError::Argument(_) => 4,
            BtrError::Validation(_) => 5,
            BtrError::Cancelled => 130,
        }
    }
}
