//! Value normalization for imported customer cells.
//!
//! Source spreadsheets are typed by hand: names in capitals, cities as
//! abbreviations, phones in local form. These helpers turn raw cells into
//! the values the customer store expects.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crm_model::Gender;

/// Default country calling code (Tanzania).
pub const DEFAULT_COUNTRY_CODE: &str = "255";

static DAY_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})-([a-z]{3,})$").expect("Invalid day-month regex"));
static MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]{3,})-(\d{1,2})$").expect("Invalid month-day regex"));

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats local phone numbers into international form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneFormat {
    /// Calling code without `+`, e.g. `255`.
    pub country_code: String,
}

impl Default for PhoneFormat {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl PhoneFormat {
    pub fn new(country_code: impl Into<String>) -> Self {
        let code: String = country_code.into();
        Self {
            country_code: code.trim().trim_start_matches('+').to_string(),
        }
    }

    /// Formats a raw phone cell.
    ///
    /// - spaces, `-`, `(` and `)` are removed
    /// - numbers already carrying the country code are kept
    /// - a leading `0` becomes `+<code>`
    /// - anything else gets `<code>` prepended
    pub fn format(&self, raw: &str) -> String {
        let clean: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .collect();
        if clean.is_empty() {
            return clean;
        }
        let code = &self.country_code;
        if clean.starts_with(&format!("+{code}")) || clean.starts_with(code.as_str()) {
            return clean;
        }
        if let Some(rest) = clean.strip_prefix('0') {
            return format!("+{code}{rest}");
        }
        format!("{code}{clean}")
    }

    /// Identity of a raw phone cell: its formatted form with a leading `+`.
    ///
    /// `0755111222`, `255755111222` and `+255 755 111 222` share one key.
    pub fn key(&self, raw: &str) -> String {
        phone_key(&self.format(raw))
    }
}

/// Identity of an already formatted phone.
///
/// Formatting leaves a number either as `+<code>...` or `<code>...`; both
/// map to the `+` form. Empty input stays empty.
pub fn phone_key(formatted: &str) -> String {
    let phone = formatted.trim();
    if phone.is_empty() || phone.starts_with('+') {
        phone.to_string()
    } else {
        format!("+{phone}")
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// Word boundaries are any non-alphanumeric character, so `O'NEIL` becomes
/// `O'Neil` and `MARY-JANE` becomes `Mary-Jane`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_alphanumeric() || c == '_' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn is_all_caps(value: &str) -> bool {
    value.chars().any(char::is_alphabetic) && value == value.to_uppercase()
}

/// Trims a name and converts all-capitals names to title case.
pub fn format_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_all_caps(trimmed) {
        title_case(trimmed)
    } else {
        trimmed.to_string()
    }
}

pub fn format_gender(raw: &str) -> Gender {
    match raw.trim().to_lowercase().as_str() {
        "male" | "m" | "1" => Gender::Male,
        "female" | "f" | "2" => Gender::Female,
        _ => Gender::Other,
    }
}

/// Expands city abbreviations and normalizes regional names.
pub fn format_city(raw: &str) -> String {
    let trimmed = raw.trim();
    let known = match trimmed.to_lowercase().as_str() {
        "dsm" | "dar" | "dar es" | "dar es salaam" => Some("Dar es Salaam"),
        "moro" | "morogoro" => Some("Morogoro"),
        "mara" => Some("Mara"),
        "arusha" => Some("Arusha"),
        "mwanza" => Some("Mwanza"),
        "dodoma" => Some("Dodoma"),
        "tanga" => Some("Tanga"),
        "mbeya" => Some("Mbeya"),
        "tabora" => Some("Tabora"),
        "singida" => Some("Singida"),
        "kigoma" => Some("Kigoma"),
        "shinyanga" => Some("Shinyanga"),
        "kagera" => Some("Kagera"),
        "manyara" => Some("Manyara"),
        "njombe" => Some("Njombe"),
        "katavi" => Some("Katavi"),
        "geita" => Some("Geita"),
        "simiyu" => Some("Simiyu"),
        "songwe" => Some("Songwe"),
        _ => None,
    };
    known.map_or_else(|| trimmed.to_string(), ToString::to_string)
}

/// Maps referral sources onto the labels used by the customer store.
pub fn format_referral_source(raw: &str) -> String {
    let trimmed = raw.trim();
    let known = match trimmed.to_lowercase().as_str() {
        "instagram" => Some("Instagram"),
        "mtandaoni" | "social media" => Some("Social Media"),
        "physically" | "walk-in" => Some("Walk-in"),
        "recommendation" | "friend" => Some("Friend"),
        "facebook" => Some("Facebook"),
        "google" => Some("Google"),
        "family" => Some("Family"),
        "colleague" => Some("Colleague"),
        "advertisement" => Some("Advertisement"),
        "website" => Some("Website"),
        "referral" => Some("Referral"),
        "other" => Some("Other"),
        _ => None,
    };
    match known {
        Some(label) => label.to_string(),
        None if trimmed.chars().count() > 1 && is_all_caps(trimmed) => title_case(trimmed),
        None => trimmed.to_string(),
    }
}

fn month_name(prefix: &str) -> Option<&'static str> {
    if prefix.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .copied()
        .find(|month| month.to_lowercase().starts_with(prefix))
}

/// Expands a month abbreviation (`dec`, `Sept`) to its full name.
///
/// Values that are not a month prefix are returned trimmed.
pub fn format_birth_month(raw: &str) -> String {
    let trimmed = raw.trim();
    month_name(&trimmed.to_lowercase()).map_or_else(|| trimmed.to_string(), ToString::to_string)
}

/// Parses `12-dec` or `dec-12` style birthdays into `(month, day)`.
///
/// The month may be abbreviated to three or more letters. Returns `None`
/// for anything else.
pub fn parse_birthday(raw: &str) -> Option<(String, String)> {
    let value = raw.trim().to_lowercase();
    let (day, month) = if let Some(caps) = DAY_MONTH.captures(&value) {
        (caps[1].to_string(), caps[2].to_string())
    } else if let Some(caps) = MONTH_DAY.captures(&value) {
        (caps[2].to_string(), caps[1].to_string())
    } else {
        return None;
    };
    let month = month_name(&month)?;
    Some((month.to_string(), day))
}

/// Leading numeric prefix of a cell, e.g. `"1500.50 TZS"` gives `"1500.50"`.
fn numeric_prefix(raw: &str, allow_fraction: bool) -> &str {
    let value = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, c) in value.char_indices() {
        match c {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if allow_fraction && !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + c.len_utf8();
    }
    if seen_digit { &value[..end] } else { "" }
}

/// Parses a money amount; unparsable input is `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    numeric_prefix(raw, true)
        .trim_end_matches('.')
        .parse()
        .unwrap_or(0.0)
}

/// Parses an integer count; unparsable input is `0`.
pub fn parse_count(raw: &str) -> i64 {
    numeric_prefix(raw, false).parse().unwrap_or(0)
}

/// Parses a day of month the way a lenient integer parse would: `"12th"`
/// and `"5."` give their leading number, `"abc"` gives `None`.
pub fn parse_day(raw: &str) -> Option<i64> {
    numeric_prefix(raw, false).parse().ok()
}

/// Only an explicit `false` deactivates a customer.
pub fn parse_active(raw: &str) -> bool {
    !raw.trim().eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_local_numbers_get_country_code() {
        let phone = PhoneFormat::default();
        assert_eq!(phone.format("0712 345 678"), "+255712345678");
        assert_eq!(phone.format("(0712)-345-678"), "+255712345678");
        assert_eq!(phone.format("712345678"), "255712345678");
    }

    #[test]
    fn phone_international_numbers_are_kept() {
        let phone = PhoneFormat::default();
        assert_eq!(phone.format("+255 712 345 678"), "+255712345678");
        assert_eq!(phone.format("255712345678"), "255712345678");
        assert_eq!(phone.format(""), "");
        assert_eq!(phone.format("   "), "");
    }

    #[test]
    fn phone_format_accepts_other_codes() {
        let phone = PhoneFormat::new("+254");
        assert_eq!(phone.country_code, "254");
        assert_eq!(phone.format("0722000111"), "+254722000111");
    }

    #[test]
    fn phone_spellings_share_one_key() {
        let phone = PhoneFormat::default();
        let key = phone.key("0755111222");
        assert_eq!(key, "+255755111222");
        assert_eq!(phone.key("255755111222"), key);
        assert_eq!(phone.key("+255 755 111 222"), key);
        assert_eq!(phone.key("755111222"), key);
        assert_eq!(phone.key(""), "");
        assert_eq!(phone_key("255755111222"), key);
        assert_eq!(phone_key(&key), key);
    }

    #[test]
    fn names_in_capitals_become_title_case() {
        assert_eq!(format_name("  ASHA JUMA "), "Asha Juma");
        assert_eq!(format_name("MARY-JANE O'NEIL"), "Mary-Jane O'Neil");
        assert_eq!(format_name("asha juma"), "asha juma");
        assert_eq!(format_name("McDonald"), "McDonald");
        assert_eq!(format_name("12345"), "12345");
    }

    #[test]
    fn gender_variants() {
        assert_eq!(format_gender("M"), Gender::Male);
        assert_eq!(format_gender(" female "), Gender::Female);
        assert_eq!(format_gender("2"), Gender::Female);
        assert_eq!(format_gender("unknown"), Gender::Other);
        assert_eq!(format_gender(""), Gender::Other);
    }

    #[test]
    fn city_abbreviations_expand() {
        assert_eq!(format_city("DSM"), "Dar es Salaam");
        assert_eq!(format_city("dar es"), "Dar es Salaam");
        assert_eq!(format_city("moro"), "Morogoro");
        assert_eq!(format_city(" Zanzibar "), "Zanzibar");
    }

    #[test]
    fn referral_sources_map_to_labels() {
        assert_eq!(format_referral_source("mtandaoni"), "Social Media");
        assert_eq!(format_referral_source("Physically"), "Walk-in");
        assert_eq!(format_referral_source("RADIO ONE"), "Radio One");
        assert_eq!(format_referral_source("a friend of mine"), "a friend of mine");
        assert_eq!(format_referral_source(""), "");
    }

    #[test]
    fn birthdays_parse_both_orders() {
        assert_eq!(
            parse_birthday("12-Dec"),
            Some(("December".to_string(), "12".to_string()))
        );
        assert_eq!(
            parse_birthday("jan-5"),
            Some(("January".to_string(), "5".to_string()))
        );
        assert_eq!(
            parse_birthday("3-september"),
            Some(("September".to_string(), "3".to_string()))
        );
        assert_eq!(parse_birthday("12-xyz"), None);
        assert_eq!(parse_birthday("2024-01-12"), None);
        assert_eq!(parse_birthday(""), None);
    }

    #[test]
    fn birth_months_expand() {
        assert_eq!(format_birth_month("dec"), "December");
        assert_eq!(format_birth_month(" Sept "), "September");
        assert_eq!(format_birth_month("ma"), "ma");
        assert_eq!(format_birth_month("12"), "12");
    }

    #[test]
    fn numbers_parse_leading_prefix() {
        assert_eq!(parse_amount("1500.50"), 1500.5);
        assert_eq!(parse_amount("1500 TZS"), 1500.0);
        assert_eq!(parse_amount("12."), 12.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_count("12abc"), 12);
        assert_eq!(parse_count("7.9"), 7);
        assert_eq!(parse_count("-3"), -3);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn days_parse_leading_number() {
        assert_eq!(parse_day("12"), Some(12));
        assert_eq!(parse_day("12th"), Some(12));
        assert_eq!(parse_day("5."), Some(5));
        assert_eq!(parse_day(" 7 "), Some(7));
        assert_eq!(parse_day("-3"), Some(-3));
        assert_eq!(parse_day("abc"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn only_false_deactivates() {
        assert!(parse_active(""));
        assert!(parse_active("yes"));
        assert!(!parse_active("false"));
        assert!(!parse_active("FALSE"));
    }
}
