use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::field::CanonicalField;

/// One imported data row, holding a value for every canonical field.
///
/// Fields that were not detected, or whose cell was missing, hold an empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportedRecord {
    values: BTreeMap<CanonicalField, String>,
}

impl ImportedRecord {
    /// A record with every field set to the empty string.
    pub fn empty() -> Self {
        Self {
            values: CanonicalField::ALL
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }

    pub fn get(&self, field: CanonicalField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder-style setter, mostly for tests and fixtures.
    #[must_use]
    pub fn with(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> + '_ {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }
}

impl Default for ImportedRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'de> Deserialize<'de> for ImportedRecord {
    /// Accepts partial objects; absent fields become empty strings.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let partial = BTreeMap::<CanonicalField, String>::deserialize(deserializer)?;
        let mut record = ImportedRecord::empty();
        for (field, value) in partial {
            record.set(field, value);
        }
        Ok(record)
    }
}
