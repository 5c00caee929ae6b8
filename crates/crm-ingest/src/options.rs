//! Import configuration.

use serde::{Deserialize, Serialize};

use crate::normalize::PhoneFormat;

/// Largest import file accepted by default (5 MB).
pub const MAX_IMPORT_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Options shared by every file in one import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Files larger than this are rejected before reading.
    pub max_file_size: u64,
    /// How phone cells are brought into international form.
    pub phone: PhoneFormat,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_IMPORT_FILE_SIZE,
            phone: PhoneFormat::default(),
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use]
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.phone = PhoneFormat::new(code);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upload_limit() {
        let options = ImportOptions::default();
        assert_eq!(options.max_file_size, 5 * 1024 * 1024);
        assert_eq!(options.phone.country_code, "255");
    }

    #[test]
    fn builder_overrides() {
        let options = ImportOptions::new()
            .with_max_file_size(1024)
            .with_country_code("+254");
        assert_eq!(options.max_file_size, 1024);
        assert_eq!(options.phone.country_code, "254");
    }
}
