//! Import planning against phones already on record.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crm_model::{CustomerDraft, RowIssue};

use crate::error::{IngestError, Result};
use crate::normalize::{PhoneFormat, phone_key};
use crate::prepare::PreparedImport;

/// Phone numbers of customers that already exist, stored as [`phone_key`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownPhones {
    phones: BTreeSet<String>,
}

impl KnownPhones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from raw phone values, keying each one.
    ///
    /// Raw values without any digit (`n/a`, `none`) are ignored.
    pub fn from_raw<I, S>(raw: I, format: &PhoneFormat) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phones = raw
            .into_iter()
            .filter(|value| has_digit(value.as_ref()))
            .map(|value| format.key(value.as_ref()))
            .collect();
        Self { phones }
    }

    /// Reads a CSV of existing customers.
    ///
    /// The column headed `phone` (any case) is used; a file whose header has
    /// no such column must have exactly one column. In a one-column file the
    /// first line is a header unless it contains a digit.
    pub fn load(path: &Path, format: &PhoneFormat) -> Result<Self> {
        let known_phones_error = |message: String| IngestError::KnownPhones {
            path: path.to_path_buf(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| match e.kind() {
                csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    IngestError::FileNotFound {
                        path: path.to_path_buf(),
                    }
                }
                _ => known_phones_error(e.to_string()),
            })?;

        let headers = reader
            .headers()
            .map_err(|e| known_phones_error(e.to_string()))?
            .clone();
        let column = match headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case("phone"))
        {
            Some(column) => column,
            None if headers.len() == 1 => 0,
            None => {
                return Err(known_phones_error(format!(
                    "expected a 'phone' column, found {} columns",
                    headers.len()
                )));
            }
        };

        let mut raw = Vec::new();
        if headers.len() == 1 && has_digit(&headers[0]) {
            raw.push(headers[0].to_string());
        }
        for record in reader.records() {
            let record = record.map_err(|e| known_phones_error(e.to_string()))?;
            if let Some(value) = record.get(column) {
                raw.push(value.to_string());
            }
        }

        let known = Self::from_raw(raw, format);
        debug!(path = %path.display(), phones = known.len(), "loaded known phones");
        Ok(known)
    }

    /// Whether a formatted phone is known, in any of its spellings.
    pub fn contains(&self, phone: &str) -> bool {
        self.phones.contains(&phone_key(phone))
    }

    pub fn insert(&mut self, phone: &str) -> bool {
        self.phones.insert(phone_key(phone))
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// Why a row will not be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The row failed validation.
    Invalid { issues: Vec<RowIssue> },
    /// A customer with this phone already exists.
    Existing,
    /// An earlier row in the same file has the same phone.
    DuplicateInFile { first_row: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCustomer {
    pub row: usize,
    pub customer: CustomerDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub phone: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// What an import would do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    pub to_create: Vec<PlannedCustomer>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportPlan {
    pub fn skipped_existing(&self) -> usize {
        self.count_skipped(|reason| matches!(reason, SkipReason::Existing))
    }

    pub fn skipped_invalid(&self) -> usize {
        self.count_skipped(|reason| matches!(reason, SkipReason::Invalid { .. }))
    }

    pub fn skipped_duplicates(&self) -> usize {
        self.count_skipped(|reason| matches!(reason, SkipReason::DuplicateInFile { .. }))
    }

    fn count_skipped(&self, predicate: impl Fn(&SkipReason) -> bool) -> usize {
        self.skipped
            .iter()
            .filter(|skipped| predicate(&skipped.reason))
            .count()
    }
}

/// Decides, per prepared row, whether it is created or skipped.
///
/// Rows are taken in file order. Invalid rows are skipped first, then rows
/// whose phone is already known, then repeats of a phone planned earlier in
/// the same file. Phones are compared by [`phone_key`].
pub fn plan_import(prepared: &PreparedImport, known: &KnownPhones) -> ImportPlan {
    let mut plan = ImportPlan::default();
    let issues = prepared.issues_by_row();
    let mut planned: BTreeMap<String, usize> = BTreeMap::new();

    for row in &prepared.rows {
        let phone = row.draft.phone.as_str();
        let key = phone_key(phone);
        let reason = if let Some(row_issues) = issues.get(&row.row) {
            Some(SkipReason::Invalid {
                issues: row_issues.iter().map(|&issue| issue.clone()).collect(),
            })
        } else if known.contains(&key) {
            Some(SkipReason::Existing)
        } else {
            planned
                .get(&key)
                .map(|&first_row| SkipReason::DuplicateInFile { first_row })
        };

        match reason {
            Some(reason) => plan.skipped.push(SkippedRow {
                row: row.row,
                phone: phone.to_string(),
                reason,
            }),
            None => {
                planned.insert(key, row.row);
                plan.to_create.push(PlannedCustomer {
                    row: row.row,
                    customer: row.draft.clone(),
                });
            }
        }
    }

    info!(
        to_create = plan.to_create.len(),
        skipped = plan.skipped.len(),
        "planned import"
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::IssueKind;

    use crate::prepare::PreparedRow;

    fn prepared_row(row: usize, phone: &str) -> PreparedRow {
        PreparedRow {
            row,
            draft: CustomerDraft {
                name: format!("Customer {row}"),
                phone: phone.to_string(),
                ..CustomerDraft::default()
            },
        }
    }

    #[test]
    fn plan_skips_existing_invalid_and_repeats() {
        let prepared = PreparedImport {
            rows: vec![
                prepared_row(2, "+255711111111"),
                prepared_row(3, "+255722222222"),
                prepared_row(4, "+255711111111"),
                prepared_row(5, "+255733333333"),
            ],
            issues: vec![RowIssue::error(
                5,
                IssueKind::InvalidBirthDay {
                    value: "40".to_string(),
                },
            )],
            duplicates: Vec::new(),
        };
        let known = KnownPhones::from_raw(["0722 222 222"], &PhoneFormat::default());

        let plan = plan_import(&prepared, &known);

        let created: Vec<usize> = plan.to_create.iter().map(|c| c.row).collect();
        assert_eq!(created, vec![2]);
        assert_eq!(plan.skipped_existing(), 1);
        assert_eq!(plan.skipped_invalid(), 1);
        assert_eq!(plan.skipped_duplicates(), 1);
        assert_eq!(
            plan.skipped[1].reason,
            SkipReason::DuplicateInFile { first_row: 2 }
        );
    }

    #[test]
    fn plan_compares_phone_spellings() {
        let prepared = PreparedImport {
            rows: vec![
                prepared_row(2, "+255755111222"),
                prepared_row(3, "255766000111"),
                prepared_row(4, "+255766000111"),
            ],
            ..PreparedImport::default()
        };
        let known = KnownPhones::from_raw(["255755111222"], &PhoneFormat::default());

        let plan = plan_import(&prepared, &known);

        let created: Vec<usize> = plan.to_create.iter().map(|c| c.row).collect();
        assert_eq!(created, vec![3]);
        assert_eq!(plan.skipped[0].reason, SkipReason::Existing);
        assert_eq!(
            plan.skipped[1].reason,
            SkipReason::DuplicateInFile { first_row: 3 }
        );
    }

    #[test]
    fn known_phones_ignore_values_without_digits() {
        let known = KnownPhones::from_raw(["n/a", "none", "", "0712345678"], &PhoneFormat::default());
        assert_eq!(known.len(), 1);
        assert!(known.contains("+255712345678"));
        assert!(known.contains("255712345678"));
    }

    #[test]
    fn empty_known_phones_create_everything() {
        let prepared = PreparedImport {
            rows: vec![prepared_row(2, "+255711111111")],
            ..PreparedImport::default()
        };
        let plan = plan_import(&prepared, &KnownPhones::new());
        assert_eq!(plan.to_create.len(), 1);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn skipped_rows_serialize_with_reason_tag() {
        let skipped = SkippedRow {
            row: 4,
            phone: "+255711111111".to_string(),
            reason: SkipReason::DuplicateInFile { first_row: 2 },
        };
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["reason"], "duplicate_in_file");
        assert_eq!(json["first_row"], 2);
    }
}
