//! Data model for bulk customer import.
//!
//! Pure types shared by the matcher, the importer and the CLI. No I/O.

pub mod customer;
pub mod detection;
pub mod error;
pub mod field;
pub mod issue;
pub mod record;
pub mod report;

pub use customer::{ColorTag, CustomerDraft, Gender, LoyaltyLevel};
pub use detection::DetectionResult;
pub use error::{ModelError, Result};
pub use field::CanonicalField;
pub use issue::{DuplicatePhone, IssueKind, IssueSeverity, RowIssue};
pub use record::ImportedRecord;
pub use report::ImportReport;
