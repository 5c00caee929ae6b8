//! Header detection results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::CanonicalField;

/// Mapping from canonical field to the 0-based header column holding it.
///
/// Holds at most one column per field. Two fields may point at the same
/// column; exclusivity is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionResult {
    columns: BTreeMap<CanonicalField, usize>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the column for a field, replacing any earlier assignment.
    pub fn insert(&mut self, field: CanonicalField, column: usize) -> Option<usize> {
        self.columns.insert(field, column)
    }

    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    /// Number of fields that were detected.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Detected fields with their columns, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, usize)> + '_ {
        self.columns.iter().map(|(field, column)| (*field, *column))
    }

    /// Canonical fields that no header matched.
    pub fn missing_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// Fields assigned to the given column.
    pub fn fields_for_column(&self, column: usize) -> Vec<CanonicalField> {
        self.iter()
            .filter(|(_, idx)| *idx == column)
            .map(|(field, _)| field)
            .collect()
    }
}

impl FromIterator<(CanonicalField, usize)> for DetectionResult {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, usize)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_field_keyed_object() {
        let detection: DetectionResult = [
            (CanonicalField::Phone, 1),
            (CanonicalField::Name, 0),
            (CanonicalField::LoyaltyLevel, 3),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&detection).unwrap();
        assert_eq!(json, r#"{"name":0,"phone":1,"loyaltyLevel":3}"#);

        let back: DetectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, detection);
    }

    #[test]
    fn missing_fields_excludes_detected() {
        let detection: DetectionResult = [(CanonicalField::Name, 0)].into_iter().collect();
        let missing = detection.missing_fields();
        assert_eq!(missing.len(), CanonicalField::COUNT - 1);
        assert!(!missing.contains(&CanonicalField::Name));
    }

    #[test]
    fn shared_columns_are_reported() {
        let detection: DetectionResult = [
            (CanonicalField::BirthDay, 2),
            (CanonicalField::Birthday, 2),
            (CanonicalField::Name, 0),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            detection.fields_for_column(2),
            vec![CanonicalField::BirthDay, CanonicalField::Birthday]
        );
    }
}
