//! Row preparation: normalization, validation and duplicate detection.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crm_model::{
    CanonicalField, ColorTag, CustomerDraft, DuplicatePhone, ImportReport, ImportedRecord,
    IssueKind, LoyaltyLevel, RowIssue,
};

use crate::normalize::{
    PhoneFormat, format_birth_month, format_city, format_gender, format_name,
    format_referral_source, parse_active, parse_amount, parse_birthday, parse_count, parse_day,
    phone_key,
};

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{8,}$").expect("Invalid phone regex"));

/// File line number of the first data row (the header is line 1).
pub const FIRST_DATA_ROW: usize = 2;

/// A normalized row that has at least a name and a phone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRow {
    pub row: usize,
    pub draft: CustomerDraft,
}

/// All rows of one report after preparation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparedImport {
    pub rows: Vec<PreparedRow>,
    pub issues: Vec<RowIssue>,
    pub duplicates: Vec<DuplicatePhone>,
}

impl PreparedImport {
    /// Issues grouped by row number.
    pub fn issues_by_row(&self) -> BTreeMap<usize, Vec<&RowIssue>> {
        let mut by_row: BTreeMap<usize, Vec<&RowIssue>> = BTreeMap::new();
        for issue in &self.issues {
            by_row.entry(issue.row).or_default().push(issue);
        }
        by_row
    }
}

fn parse_loyalty(raw: &str) -> Option<LoyaltyLevel> {
    if raw.trim().is_empty() {
        Some(LoyaltyLevel::default())
    } else {
        raw.parse().ok()
    }
}

/// Converts a raw record into a normalized draft.
pub fn prepare_customer(record: &ImportedRecord, phone: &PhoneFormat) -> CustomerDraft {
    let cell = |field| record.get(field).trim();

    let mut birth_month = format_birth_month(cell(CanonicalField::BirthMonth));
    let mut birth_day = cell(CanonicalField::BirthDay).to_string();
    if birth_month.contains('-')
        && let Some((month, day)) = parse_birthday(&birth_month)
    {
        birth_month = month;
        birth_day = day;
    }
    if let Some((month, day)) = parse_birthday(cell(CanonicalField::Birthday)) {
        birth_month = month;
        birth_day = day;
    }

    CustomerDraft {
        name: format_name(cell(CanonicalField::Name)),
        phone: phone.format(cell(CanonicalField::Phone)),
        whatsapp: phone.format(cell(CanonicalField::Whatsapp)),
        gender: format_gender(cell(CanonicalField::Gender)),
        city: format_city(cell(CanonicalField::City)),
        notes: cell(CanonicalField::Notes).to_string(),
        loyalty_level: parse_loyalty(cell(CanonicalField::LoyaltyLevel)),
        color_tag: ColorTag::normalize(cell(CanonicalField::ColorTag)),
        birth_month,
        birth_day,
        referral_source: format_referral_source(cell(CanonicalField::ReferralSource)),
        referral_source_custom: cell(CanonicalField::ReferralSourceCustom).to_string(),
        location_description: cell(CanonicalField::LocationDescription).to_string(),
        national_id: cell(CanonicalField::NationalId).to_string(),
        referred_by: cell(CanonicalField::ReferredBy).to_string(),
        total_spent: parse_amount(cell(CanonicalField::TotalSpent)),
        points: parse_count(cell(CanonicalField::Points)),
        is_active: parse_active(cell(CanonicalField::IsActive)),
        profile_image: cell(CanonicalField::ProfileImage).to_string(),
        email: cell(CanonicalField::Email).to_string(),
        id: cell(CanonicalField::Id).to_string(),
    }
}

/// Validates a draft.
///
/// `record` supplies the raw loyalty value for the issue message; the phone
/// is checked in its formatted form.
pub fn validate_customer(
    record: &ImportedRecord,
    draft: &CustomerDraft,
    row: usize,
) -> Vec<RowIssue> {
    let mut issues = Vec::new();

    if draft.name.is_empty() {
        issues.push(RowIssue::error(row, IssueKind::NameRequired));
    }

    if draft.phone.is_empty() {
        issues.push(RowIssue::error(row, IssueKind::PhoneRequired));
    } else if !PHONE_PATTERN.is_match(&draft.phone) {
        issues.push(RowIssue::error(
            row,
            IssueKind::InvalidPhone {
                value: draft.phone.clone(),
            },
        ));
    }

    if draft.loyalty_level.is_none() {
        issues.push(RowIssue::error(
            row,
            IssueKind::InvalidLoyaltyLevel {
                value: record.get(CanonicalField::LoyaltyLevel).trim().to_string(),
            },
        ));
    }

    match (draft.birth_month.is_empty(), draft.birth_day.is_empty()) {
        (true, false) => issues.push(RowIssue::error(row, IssueKind::BirthDayWithoutMonth)),
        (false, true) => issues.push(RowIssue::error(row, IssueKind::BirthMonthWithoutDay)),
        _ => {}
    }

    if !draft.birth_day.is_empty() {
        let valid = parse_day(&draft.birth_day).is_some_and(|day| (1..=31).contains(&day));
        if !valid {
            issues.push(RowIssue::error(
                row,
                IssueKind::InvalidBirthDay {
                    value: draft.birth_day.clone(),
                },
            ));
        }
    }

    issues
}

/// Phones that appear on more than one row, in first-seen order.
///
/// Rows are compared by [`phone_key`], so `+255...` and `255...` spellings
/// of one number count as the same phone.
pub fn find_duplicate_phones(rows: &[PreparedRow]) -> Vec<DuplicatePhone> {
    let mut order: Vec<String> = Vec::new();
    let mut seen: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for prepared in rows {
        let key = phone_key(&prepared.draft.phone);
        if key.is_empty() {
            continue;
        }
        let entry = seen.entry(key.clone()).or_default();
        if entry.is_empty() {
            order.push(key);
        }
        entry.push(prepared.row);
    }

    order
        .into_iter()
        .filter_map(|phone| {
            let rows = seen.remove(&phone)?;
            (rows.len() > 1).then_some(DuplicatePhone { phone, rows })
        })
        .collect()
}

/// Prepares every record of a report.
///
/// Rows without a name or phone produce issues but are left out of `rows`.
pub fn prepare_customers(report: &ImportReport, phone: &PhoneFormat) -> PreparedImport {
    let mut prepared = PreparedImport::default();

    for (index, record) in report.data.iter().enumerate() {
        let row = index + FIRST_DATA_ROW;
        let draft = prepare_customer(record, phone);
        let issues = validate_customer(record, &draft, row);
        if !issues.is_empty() {
            debug!(row, issues = issues.len(), "row failed validation");
        }
        prepared.issues.extend(issues);

        if draft.name.is_empty() || draft.phone.is_empty() {
            continue;
        }
        prepared.rows.push(PreparedRow { row, draft });
    }

    prepared.duplicates = find_duplicate_phones(&prepared.rows);
    info!(
        rows = prepared.rows.len(),
        issues = prepared.issues.len(),
        duplicates = prepared.duplicates.len(),
        "prepared customer rows"
    );
    prepared
}
