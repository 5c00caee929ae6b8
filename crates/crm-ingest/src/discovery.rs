//! Input discovery: expands directories into their import files.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extensions treated as comma-delimited text.
pub const IMPORT_EXTENSIONS: [&str; 2] = ["csv", "txt"];

fn is_import_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMPORT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Lists the import files directly inside a directory, sorted by file name.
pub fn list_import_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_import_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Expands command-line inputs: files are kept as given, directories are
/// replaced by their import files.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(list_import_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
