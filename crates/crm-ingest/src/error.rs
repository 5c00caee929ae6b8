//! Error types for customer file import.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while importing a customer file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Import file not found.
    #[error("import file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a directory of import files.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding we cannot decode.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Structure Errors ===
    /// Fewer than two non-blank lines.
    #[error("file must contain at least a header row and one data row")]
    MissingDataRow,

    // === Configuration Errors ===
    /// Known-phones file could not be parsed.
    #[error("failed to parse known phones {path}: {message}")]
    KnownPhones { path: PathBuf, message: String },
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, IngestError>;
