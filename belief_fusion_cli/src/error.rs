//! Error types for the file adapters.

use thiserror::Error;

/// Adapter error type.
///
/// Data-quality problems inside a record line are not errors: malformed
/// lines degrade to zero-weight records in the core parser. Only IO and
/// path problems surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path cannot name a belief system (no usable file stem)
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;
