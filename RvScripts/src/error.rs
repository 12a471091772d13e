//! Error types for `RvScripts`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `RvScripts` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input container could not be opened.
    #[error("failed to open {path}: {source}")]
    InputUnreadable {
        /// The container path that was requested.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A folder or output root directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Marshal Format Errors ====================
    /// The stream does not start with a supported Marshal version (4.8).
    #[error("unsupported Marshal version {major}.{minor} (supported: 4.8)")]
    UnsupportedMarshalVersion {
        /// Major version byte.
        major: u8,
        /// Minor version byte.
        minor: u8,
    },

    /// The Marshal stream could not be decoded.
    #[error("Marshal decoding failed: {message}")]
    MarshalDecodeFailed {
        /// The decoder's message.
        message: String,
    },

    /// The stream ended before its header was complete.
    #[error("unexpected end of file")]
    UnexpectedEof,

    // ==================== Script Container Errors ====================
    /// The decoded value tree is not a script container.
    #[error("invalid script container: {message}")]
    InvalidScriptContainer {
        /// Description of what is invalid.
        message: String,
    },

    // ==================== Compression Errors ====================
    /// Zlib decompression failed.
    #[error("Zlib decompression failed: {message}")]
    ZlibDecompressionFailed {
        /// The error message.
        message: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error came from decoding the container, as opposed to IO.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedMarshalVersion { .. }
                | Error::MarshalDecodeFailed { .. }
                | Error::UnexpectedEof
                | Error::InvalidScriptContainer { .. }
        )
    }
}

/// A specialized Result type for `RvScripts` operations.
pub type Result<T> = std::result::Result<T, Error>;
