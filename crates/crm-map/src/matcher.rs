//! Header matcher: assigns a source column to each canonical field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crm_model::{CanonicalField, DetectionResult};

use crate::score::{
    ABBREVIATION_GATE, ABBREVIATION_SCORE, MatchTier, matches_abbreviation, score_pair,
};
use crate::synonyms::{SynonymTable, abbreviations};
use crate::utils::normalize_text;

/// The winning column for one field, with the evidence for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    pub column: usize,
    pub score: f32,
    pub tier: MatchTier,
    /// The synonym or abbreviation that produced the score.
    pub matched: String,
}

impl FieldMatch {
    /// Human-readable explanation of the match.
    pub fn explain(&self) -> String {
        format!(
            "{} match on '{}' ({:.0}%)",
            self.tier, self.matched, self.score
        )
    }
}

/// Detailed detection output: per-field matches plus the normalized headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub matches: BTreeMap<CanonicalField, FieldMatch>,
    pub normalized_headers: Vec<String>,
}

impl Detection {
    /// Drops the evidence and keeps only field-to-column assignments.
    pub fn to_result(&self) -> DetectionResult {
        self.matches
            .iter()
            .map(|(field, found)| (*field, found.column))
            .collect()
    }
}

/// Matches header rows against a synonym table.
///
/// Every field is matched independently: two fields may end up pointing at
/// the same column.
#[derive(Debug, Clone, Copy)]
pub struct HeaderMatcher<'a> {
    table: &'a SynonymTable,
}

impl HeaderMatcher<'static> {
    /// Matcher over the built-in synonym table.
    pub fn builtin() -> Self {
        Self::new(SynonymTable::builtin())
    }
}

impl<'a> HeaderMatcher<'a> {
    pub fn new(table: &'a SynonymTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a SynonymTable {
        self.table
    }

    /// Field-to-column assignment for a raw header row.
    pub fn detect<S: AsRef<str>>(&self, headers: &[S]) -> DetectionResult {
        self.detect_detailed(headers).to_result()
    }

    /// Like [`Self::detect`], keeping the score and tier of every match.
    pub fn detect_detailed<S: AsRef<str>>(&self, headers: &[S]) -> Detection {
        let normalized: Vec<String> = headers
            .iter()
            .map(|header| normalize_text(header.as_ref()))
            .collect();

        let mut matches = BTreeMap::new();
        for field in CanonicalField::ALL {
            if let Some(found) = self.best_match(field, &normalized) {
                debug!(
                    field = %field,
                    column = found.column,
                    score = found.score,
                    tier = %found.tier,
                    "detected column"
                );
                matches.insert(field, found);
            } else {
                trace!(field = %field, "no column matched");
            }
        }

        Detection {
            matches,
            normalized_headers: normalized,
        }
    }

    fn best_match(&self, field: CanonicalField, headers: &[String]) -> Option<FieldMatch> {
        let mut best: Option<FieldMatch> = None;

        for (column, header) in headers.iter().enumerate() {
            for synonym in self.table.synonyms(field) {
                let Some(pair) = score_pair(header, synonym) else {
                    continue;
                };
                if best.as_ref().is_none_or(|b| pair.score > b.score) {
                    best = Some(FieldMatch {
                        column,
                        score: pair.score,
                        tier: pair.tier,
                        matched: synonym.clone(),
                    });
                }
            }
        }

        if best.as_ref().is_some_and(|b| b.score >= ABBREVIATION_GATE) {
            return best;
        }

        for (column, header) in headers.iter().enumerate() {
            for abbreviation in abbreviations(field) {
                let abbreviation = normalize_text(abbreviation);
                if !matches_abbreviation(header, &abbreviation) {
                    continue;
                }
                if best.as_ref().is_none_or(|b| ABBREVIATION_SCORE > b.score) {
                    best = Some(FieldMatch {
                        column,
                        score: ABBREVIATION_SCORE,
                        tier: MatchTier::Abbreviation,
                        matched: abbreviation,
                    });
                }
            }
        }

        best
    }
}

impl Default for HeaderMatcher<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}
