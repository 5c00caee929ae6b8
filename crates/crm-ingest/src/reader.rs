//! Import file reading with size and encoding checks.

use std::borrow::Cow;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::options::ImportOptions;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size against a limit before loading.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(metadata.len())
}

/// Decodes raw file bytes into text.
///
/// UTF-16 (detected by its BOM) is rejected. A UTF-8 BOM is dropped.
/// Bytes that are not valid UTF-8 are decoded as Windows-1252, which is what
/// spreadsheet exports on Windows usually produce.
pub fn decode_bytes<'a>(path: &Path, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }

    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            let (text, had_errors) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            warn!(
                path = %path.display(),
                had_errors,
                "file is not valid UTF-8, decoded as Windows-1252"
            );
            Ok(text)
        }
    }
}

/// Reads an import file into text after checking its size and encoding.
pub fn read_import_text(path: &Path, options: &ImportOptions) -> Result<String> {
    let size = check_file_size_with_limit(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| open_error(path, e))?;
    debug!(path = %path.display(), size, "read import file");
    Ok(decode_bytes(path, &bytes)?.into_owned())
}
