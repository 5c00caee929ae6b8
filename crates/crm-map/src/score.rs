//! Scoring of header/synonym pairs.
//!
//! Scores run from 0 to 100. Each pair is scored by the first tier that
//! applies:
//!
//! | Tier         | Condition                                   | Score                         |
//! |--------------|---------------------------------------------|-------------------------------|
//! | Exact        | normalized strings are equal                | 100                           |
//! | Containment  | one string contains the other               | `min_len / max_len * 80`      |
//! | Token        | synonym words (len > 2) found in the header | `matched / synonym_words * 60`|
//!
//! The abbreviation tier is field-level rather than pair-level and is only
//! consulted when no pair reached [`ABBREVIATION_GATE`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::words;

pub const EXACT_SCORE: f32 = 100.0;
pub const CONTAINMENT_WEIGHT: f32 = 80.0;
pub const TOKEN_WEIGHT: f32 = 60.0;
pub const ABBREVIATION_SCORE: f32 = 50.0;
/// Best score below which abbreviations are tried.
pub const ABBREVIATION_GATE: f32 = 40.0;
/// Synonym words this short are ignored by the token tier.
const MIN_TOKEN_LEN: usize = 3;
/// Abbreviations this short must equal a whole header word.
const SHORT_ABBREVIATION_LEN: usize = 2;

/// Which rule produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Containment,
    Token,
    Abbreviation,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Containment => "containment",
            MatchTier::Token => "token",
            MatchTier::Abbreviation => "abbreviation",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score for a single header/synonym pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub score: f32,
    pub tier: MatchTier,
}

/// Scores a normalized header against a normalized synonym.
///
/// Returns `None` when no tier applies or the score would be zero. Blank
/// headers never match.
pub fn score_pair(header: &str, synonym: &str) -> Option<PairScore> {
    if header.is_empty() || synonym.is_empty() {
        return None;
    }

    if header == synonym {
        return Some(PairScore {
            score: EXACT_SCORE,
            tier: MatchTier::Exact,
        });
    }

    if header.contains(synonym) || synonym.contains(header) {
        let (short, long) = if header.len() <= synonym.len() {
            (header.len(), synonym.len())
        } else {
            (synonym.len(), header.len())
        };
        return Some(PairScore {
            score: short as f32 / long as f32 * CONTAINMENT_WEIGHT,
            tier: MatchTier::Containment,
        });
    }

    let synonym_words = words(synonym);
    let header_words = words(header);
    let matched = synonym_words
        .iter()
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .filter(|word| {
            header_words
                .iter()
                .any(|hw| hw.contains(**word) || word.contains(*hw))
        })
        .count();
    if matched == 0 {
        return None;
    }
    Some(PairScore {
        score: matched as f32 / synonym_words.len() as f32 * TOKEN_WEIGHT,
        tier: MatchTier::Token,
    })
}

/// True when a normalized header matches a normalized abbreviation.
///
/// One- and two-letter abbreviations must equal a whole header word so that
/// `p` does not match every header containing the letter. Longer ones match
/// by containment in either direction; the reverse direction needs a header
/// of at least three characters.
pub fn matches_abbreviation(header: &str, abbreviation: &str) -> bool {
    if header.is_empty() || abbreviation.is_empty() {
        return false;
    }
    if abbreviation.len() <= SHORT_ABBREVIATION_LEN {
        return words(header).contains(&abbreviation);
    }
    header.contains(abbreviation)
        || (header.len() >= MIN_TOKEN_LEN && abbreviation.contains(header))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn exact_match_scores_100() {
        let score = score_pair("phone number", "phone number").unwrap();
        assert_eq!(score.tier, MatchTier::Exact);
        assert!(approx(score.score, 100.0));
    }

    #[test]
    fn containment_scales_by_length_ratio() {
        // "phone" inside "phone number": 5 / 12 * 80
        let score = score_pair("phone number", "phone").unwrap();
        assert_eq!(score.tier, MatchTier::Containment);
        assert!(approx(score.score, 5.0 / 12.0 * 80.0));

        let reverse = score_pair("tel", "telephone").unwrap();
        assert_eq!(reverse.tier, MatchTier::Containment);
        assert!(approx(reverse.score, 3.0 / 9.0 * 80.0));
    }

    #[test]
    fn token_overlap_counts_long_words() {
        // "customer status" vs "status of client": "status" matches, "customer" doesn't.
        let score = score_pair("status of client", "customer status").unwrap();
        assert_eq!(score.tier, MatchTier::Token);
        assert!(approx(score.score, 0.5 * 60.0));
    }

    #[test]
    fn token_overlap_ignores_short_words() {
        // "id" is too short to count; "number" matches.
        let score = score_pair("number given", "id number").unwrap();
        assert_eq!(score.tier, MatchTier::Token);
        assert!(approx(score.score, 0.5 * 60.0));
        assert!(score_pair("id code", "id card").is_none());
    }

    #[test]
    fn token_overlap_accepts_superstrings() {
        // header word "mob" is inside synonym word "mobile"
        let score = score_pair("mob no", "mobile number").unwrap();
        assert_eq!(score.tier, MatchTier::Token);
        assert!(approx(score.score, 0.5 * 60.0));
    }

    #[test]
    fn blank_headers_never_match() {
        assert!(score_pair("", "phone number").is_none());
        assert!(score_pair("phone", "").is_none());
    }

    #[test]
    fn unrelated_strings_do_not_match() {
        assert!(score_pair("xx", "phone number").is_none());
    }

    #[test]
    fn short_abbreviations_need_whole_words() {
        assert!(matches_abbreviation("ph no", "ph"));
        assert!(matches_abbreviation("p", "p"));
        assert!(!matches_abbreviation("zip", "p"));
        assert!(!matches_abbreviation("graph", "ph"));
    }

    #[test]
    fn long_abbreviations_match_by_containment() {
        assert!(matches_abbreviation("mob 1", "mob"));
        assert!(matches_abbreviation("mobi", "mobile"));
        assert!(!matches_abbreviation("mo", "mobile"));
        assert!(!matches_abbreviation("", "mobile"));
    }
}
