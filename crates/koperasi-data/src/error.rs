//! Error types for the koperasi-data crate.
//!
//! Decoding and atomic write failures are reported through semantic enums
//! built with `thiserror`, carrying enough context to log without the
//! raw payload.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while converting record collections to or from their stored
/// JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The stored payload is not a valid list of records.
    #[error("malformed {collection} payload: {message}")]
    Malformed {
        /// Collection being decoded.
        collection: &'static str,
        /// Description of the parse error.
        message: String,
    },

    /// Records could not be serialized.
    #[error("failed to encode {collection}: {message}")]
    Encode {
        /// Collection being encoded.
        collection: &'static str,
        /// Description of the serialization error.
        message: String,
    },
}

/// Errors raised while replacing a file atomically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtomicWriteError {
    /// The target path is not a bare file name inside the directory.
    #[error("'{path}' must name a file directly inside the store directory")]
    InvalidPath {
        /// Offending path.
        path: Utf8PathBuf,
    },

    /// Writing, syncing or renaming failed.
    #[error("failed to write '{path}': {message}")]
    Io {
        /// Path that was being written.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
