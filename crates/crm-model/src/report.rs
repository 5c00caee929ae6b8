use serde::{Deserialize, Serialize};

use crate::detection::DetectionResult;
use crate::field::CanonicalField;
use crate::record::ImportedRecord;

/// Result of one file import: projected rows plus the detection that
/// produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// One record per non-blank data line, in file order.
    pub data: Vec<ImportedRecord>,
    pub detected_columns: DetectionResult,
    /// Reserved for per-row validation; empty when produced by import.
    pub errors: Vec<String>,
    /// The raw header row as read.
    pub headers: Vec<String>,
}

impl ImportReport {
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    pub fn detected_count(&self) -> usize {
        self.detected_columns.len()
    }

    /// Header text for the column a field was detected in.
    pub fn header_for(&self, field: CanonicalField) -> Option<&str> {
        let column = self.detected_columns.column(field)?;
        self.headers.get(column).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_uses_camel_case_keys() {
        let report = ImportReport {
            data: vec![ImportedRecord::empty()],
            detected_columns: [(CanonicalField::Phone, 0)].into_iter().collect(),
            errors: vec![],
            headers: vec!["Mobile".to_string()],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("detectedColumns").is_some());
        assert_eq!(value["detectedColumns"]["phone"], 0);
        assert_eq!(value["headers"][0], "Mobile");
        assert_eq!(report.header_for(CanonicalField::Phone), Some("Mobile"));
        assert_eq!(report.header_for(CanonicalField::Name), None);
    }
}
