//! Row projection: pulls detected columns out of a raw data row.

use crm_model::{CanonicalField, DetectionResult, ImportedRecord};

/// Builds a record from one data row.
///
/// Fields without a detected column, or whose column lies past the end of
/// the row, are left empty. Never fails.
pub fn project_row<S: AsRef<str>>(detection: &DetectionResult, row: &[S]) -> ImportedRecord {
    let mut record = ImportedRecord::empty();
    for (field, column) in detection.iter() {
        if let Some(value) = row.get(column) {
            record.set(field, value.as_ref());
        }
    }
    record
}

/// Value of one field in a raw row, or `""`.
pub fn extract_value<'r, S: AsRef<str>>(
    detection: &DetectionResult,
    row: &'r [S],
    field: CanonicalField,
) -> &'r str {
    detection
        .column(field)
        .and_then(|column| row.get(column))
        .map_or("", |value| value.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection() -> DetectionResult {
        [
            (CanonicalField::Name, 0),
            (CanonicalField::Phone, 1),
            (CanonicalField::City, 4),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn projects_detected_columns() {
        let record = project_row(&detection(), &["Asha", "0712345678", "x", "y", "Arusha"]);
        assert_eq!(record.get(CanonicalField::Name), "Asha");
        assert_eq!(record.get(CanonicalField::Phone), "0712345678");
        assert_eq!(record.get(CanonicalField::City), "Arusha");
        assert_eq!(record.get(CanonicalField::Gender), "");
    }

    #[test]
    fn short_rows_leave_fields_empty() {
        let record = project_row(&detection(), &["Asha"]);
        assert_eq!(record.get(CanonicalField::Name), "Asha");
        assert_eq!(record.get(CanonicalField::Phone), "");
        assert_eq!(record.get(CanonicalField::City), "");
    }

    #[test]
    fn empty_row_gives_blank_record() {
        let row: [&str; 0] = [];
        assert!(project_row(&detection(), &row).is_blank());
    }

    #[test]
    fn extract_value_reads_single_field() {
        let row = ["Asha", "0712345678"];
        assert_eq!(extract_value(&detection(), &row, CanonicalField::Phone), "0712345678");
        assert_eq!(extract_value(&detection(), &row, CanonicalField::City), "");
        assert_eq!(extract_value(&detection(), &row, CanonicalField::Email), "");
    }
}
