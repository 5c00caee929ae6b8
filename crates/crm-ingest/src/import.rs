//! File import: header detection plus row projection.

use std::path::Path;

use tracing::{info, info_span, warn};

use crm_map::{HeaderMatcher, project_row};
use crm_model::{CanonicalField, ImportReport};

use crate::error::{IngestError, Result};
use crate::options::ImportOptions;
use crate::progress::ImportProgress;
use crate::reader::read_import_text;
use crate::text::{parse_data_line, parse_header_line, split_lines};

/// Callback receiving the single progress notice of an import.
pub type ProgressSink<'a> = &'a mut dyn FnMut(&ImportProgress);

/// Imports comma-delimited text.
///
/// The first non-blank line is the header row; every later non-blank line
/// becomes one record, in order. Fails only when there is no data line.
pub fn import_text(
    text: &str,
    matcher: &HeaderMatcher<'_>,
    progress: Option<ProgressSink<'_>>,
) -> Result<ImportReport> {
    let lines = split_lines(text);
    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(IngestError::MissingDataRow);
    };
    if data_lines.is_empty() {
        return Err(IngestError::MissingDataRow);
    }

    let headers = parse_header_line(header_line);
    let detected_columns = matcher.detect(&headers);

    let notice = ImportProgress::from_counts(detected_columns.len(), CanonicalField::COUNT);
    if notice.is_success() {
        info!(
            detected = detected_columns.len(),
            total = CanonicalField::COUNT,
            columns = headers.len(),
            "header detection finished"
        );
    } else {
        warn!(columns = headers.len(), "no columns detected in header row");
    }
    if let Some(sink) = progress {
        sink(&notice);
    }

    let data = data_lines
        .iter()
        .map(|line| project_row(&detected_columns, &parse_data_line(line)))
        .collect();

    Ok(ImportReport {
        data,
        detected_columns,
        errors: Vec::new(),
        headers,
    })
}

/// Reads a file and imports it.
pub fn import_file(
    path: &Path,
    options: &ImportOptions,
    matcher: &HeaderMatcher<'_>,
    progress: Option<ProgressSink<'_>>,
) -> Result<ImportReport> {
    let span = info_span!("import_file", path = %path.display());
    let _guard = span.enter();

    let text = read_import_text(path, options)?;
    let report = import_text(&text, matcher, progress)?;
    info!(rows = report.row_count(), "imported rows");
    Ok(report)
}
