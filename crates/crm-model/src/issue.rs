use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::CanonicalField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// What is wrong with an imported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    NameRequired,
    PhoneRequired,
    InvalidPhone { value: String },
    InvalidLoyaltyLevel { value: String },
    BirthDayWithoutMonth,
    BirthMonthWithoutDay,
    InvalidBirthDay { value: String },
}

impl IssueKind {
    /// The field the issue is attached to.
    pub fn field(&self) -> CanonicalField {
        match self {
            IssueKind::NameRequired => CanonicalField::Name,
            IssueKind::PhoneRequired | IssueKind::InvalidPhone { .. } => CanonicalField::Phone,
            IssueKind::InvalidLoyaltyLevel { .. } => CanonicalField::LoyaltyLevel,
            IssueKind::BirthDayWithoutMonth => CanonicalField::BirthMonth,
            IssueKind::BirthMonthWithoutDay | IssueKind::InvalidBirthDay { .. } => {
                CanonicalField::BirthDay
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            IssueKind::NameRequired => "Name is required",
            IssueKind::PhoneRequired => "Phone number is required",
            IssueKind::InvalidPhone { .. } => "Invalid phone number format",
            IssueKind::InvalidLoyaltyLevel { .. } => "Invalid loyalty level",
            IssueKind::BirthDayWithoutMonth => {
                "Birth month is required if birth day is provided"
            }
            IssueKind::BirthMonthWithoutDay => {
                "Birth day is required if birth month is provided"
            }
            IssueKind::InvalidBirthDay { .. } => "Birth day must be a number between 1-31",
        }
    }
}

/// A validation issue found on one imported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 1-based file line number; the header is row 1.
    pub row: usize,
    pub severity: IssueSeverity,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl RowIssue {
    pub fn error(row: usize, kind: IssueKind) -> Self {
        Self {
            row,
            severity: IssueSeverity::Error,
            kind,
        }
    }

    pub fn field(&self) -> CanonicalField {
        self.kind.field()
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.kind.message())
    }
}

/// A phone number that appears on more than one row of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePhone {
    pub phone: String,
    pub rows: Vec<usize>,
}

impl fmt::Display for DuplicatePhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .rows
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Duplicate phone number \"{}\" found in rows: {rows}",
            self.phone
        )
    }
}
