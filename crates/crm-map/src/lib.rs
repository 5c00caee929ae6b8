//! Column detection for customer imports.
//!
//! Given the header row of an uploaded file, decides which column holds
//! which canonical customer field, then projects data rows into records.
//!
//! # Example
//!
//! ```
//! use crm_map::{HeaderMatcher, project_row};
//! use crm_model::CanonicalField;
//!
//! let detection = HeaderMatcher::builtin().detect(&["Full Name", "Phone Number"]);
//! assert_eq!(detection.column(CanonicalField::Name), Some(0));
//!
//! let record = project_row(&detection, &["Asha Juma", "0712 345 678"]);
//! assert_eq!(record.get(CanonicalField::Phone), "0712 345 678");
//! ```

#![deny(unsafe_code)]

mod error;
mod matcher;
mod project;
mod score;
mod synonyms;
mod utils;

pub use error::{MapError, Result};
pub use matcher::{Detection, FieldMatch, HeaderMatcher};
pub use project::{extract_value, project_row};
pub use score::{
    ABBREVIATION_GATE, ABBREVIATION_SCORE, MatchTier, PairScore, matches_abbreviation, score_pair,
};
pub use synonyms::{SynonymOverrides, SynonymTable, abbreviations};
pub use utils::normalize_text;
