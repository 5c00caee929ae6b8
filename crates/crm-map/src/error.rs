//! Error types for header mapping configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from building or configuring synonym tables.
///
/// Matching itself never fails; only loading configuration can.
#[derive(Debug, Error)]
pub enum MapError {
    /// A synonym override named a field that does not exist.
    #[error("unknown canonical field in synonym overrides: {0}")]
    UnknownField(String),

    /// Override document is not a JSON object of string lists.
    #[error("invalid synonym overrides: {message}")]
    InvalidOverrides { message: String },

    /// Override file could not be read.
    #[error("failed to read synonym overrides {path}: {source}")]
    OverridesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MapError::UnknownField("shoeSize".to_string());
        assert_eq!(
            err.to_string(),
            "unknown canonical field in synonym overrides: shoeSize"
        );
    }
}
