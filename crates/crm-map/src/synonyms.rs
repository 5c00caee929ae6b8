//! Field synonym and abbreviation tables.
//!
//! Each canonical field has an ordered list of header spellings a human
//! might use for it. The built-in table covers the spellings seen in real
//! customer exports; callers can append more with [`SynonymOverrides`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crm_model::CanonicalField;

use crate::error::{MapError, Result};
use crate::utils::normalize_text;

static BUILTIN: LazyLock<SynonymTable> = LazyLock::new(|| {
    SynonymTable::from_entries(
        CanonicalField::ALL
            .iter()
            .map(|field| (*field, builtin_synonyms(*field).iter().copied())),
    )
});

fn builtin_synonyms(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::Name => &[
            "name",
            "full name",
            "customer name",
            "first name",
            "client name",
            "customer",
            "client",
            "fullname",
            "firstname",
            "lastname",
            "last name",
        ],
        CanonicalField::Phone => &[
            "phone",
            "phone number",
            "mobile",
            "mobile phone",
            "primary phone",
            "phone 1 - value",
            "contact",
            "contact number",
            "telephone",
            "tel",
            "cell",
            "cell phone",
            "mobile number",
        ],
        CanonicalField::Whatsapp => &[
            "whatsapp",
            "whatsapp number",
            "whats app",
            "whatsapp phone",
            "wa",
            "whatsapp contact",
        ],
        CanonicalField::Gender => &["gender", "sex", "male/female", "m/f", "gender identity"],
        CanonicalField::City => &[
            "city",
            "location",
            "home city",
            "business city",
            "town",
            "address",
            "residence",
            "home town",
            "business town",
        ],
        CanonicalField::Notes => &[
            "notes",
            "comments",
            "remarks",
            "description",
            "details",
            "additional info",
            "extra info",
        ],
        CanonicalField::LoyaltyLevel => &[
            "loyaltylevel",
            "loyalty",
            "loyalty level",
            "level",
            "customer level",
            "tier",
            "membership level",
            "loyalty tier",
        ],
        CanonicalField::ColorTag => &[
            "colortag",
            "color tag",
            "tag",
            "customer tag",
            "status tag",
            "priority",
            "category",
            "type",
        ],
        CanonicalField::BirthMonth => &[
            "birthmonth",
            "birth month",
            "month",
            "birthday month",
            "month of birth",
            "dob month",
        ],
        CanonicalField::BirthDay => &[
            "birthday",
            "birth day",
            "day",
            "birthday day",
            "day of birth",
            "dob day",
            "birth date",
        ],
        CanonicalField::ReferralSource => &[
            "referralsource",
            "referral source",
            "referral",
            "referred by",
            "referral resource",
            "how did you hear",
            "source",
            "referrer source",
        ],
        CanonicalField::ReferralSourceCustom => &[
            "referralsourcecustom",
            "referral source custom",
            "custom referral",
            "other referral",
            "custom source",
        ],
        CanonicalField::LocationDescription => &[
            "locationdescription",
            "location description",
            "address",
            "home address",
            "business address",
            "street address",
            "full address",
            "detailed address",
        ],
        CanonicalField::NationalId => &[
            "nationalid",
            "national id",
            "id number",
            "national id number",
            "identity number",
            "id card",
            "passport number",
        ],
        CanonicalField::ReferredBy => &[
            "referredby",
            "referred by",
            "referrer",
            "who referred",
            "referred by name",
            "referrer name",
        ],
        CanonicalField::TotalSpent => &[
            "totalspent",
            "total spent",
            "spent",
            "total amount",
            "amount spent",
            "total purchase",
            "total value",
        ],
        CanonicalField::Points => &[
            "points",
            "loyalty points",
            "reward points",
            "customer points",
            "bonus points",
        ],
        CanonicalField::IsActive => &[
            "isactive",
            "is active",
            "active",
            "status",
            "customer status",
            "active status",
        ],
        CanonicalField::ProfileImage => &[
            "profileimage",
            "profile image",
            "image",
            "photo",
            "picture",
            "avatar",
            "profile picture",
        ],
        CanonicalField::Birthday => &[
            "birthday",
            "birth day",
            "birth",
            "birth date",
            "date of birth",
            "dob",
        ],
        CanonicalField::Email => &[
            "email",
            "e-mail",
            "email address",
            "mail",
            "e-mail address",
        ],
        CanonicalField::Id => &["id", "customer id", "client id", "record id", "uuid"],
    }
}

/// Ordered, normalized header spellings per canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    entries: BTreeMap<CanonicalField, Vec<String>>,
}

impl SynonymTable {
    /// The built-in table, shared for the life of the process.
    pub fn builtin() -> &'static SynonymTable {
        &BUILTIN
    }

    /// Builds a table from explicit spellings.
    ///
    /// Spellings are normalized; blanks and repeats are dropped while the
    /// first-seen order is kept. Fields without entries have no synonyms.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CanonicalField, S)>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut table = Self {
            entries: BTreeMap::new(),
        };
        for (field, spellings) in entries {
            for spelling in spellings {
                table.push(field, spelling.as_ref());
            }
        }
        table
    }

    /// Returns the spellings for a field, in priority order.
    pub fn synonyms(&self, field: CanonicalField) -> &[String] {
        self.entries.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fields that have at least one spelling, in field order.
    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.entries
            .iter()
            .filter(|(_, spellings)| !spellings.is_empty())
            .map(|(field, _)| *field)
    }

    /// Returns a copy of this table with extra spellings appended.
    pub fn with_overrides(&self, overrides: &SynonymOverrides) -> Result<Self> {
        let mut table = self.clone();
        for (name, spellings) in &overrides.fields {
            let field: CanonicalField = name
                .parse()
                .map_err(|_| MapError::UnknownField(name.clone()))?;
            for spelling in spellings {
                table.push(field, spelling);
            }
        }
        Ok(table)
    }

    fn push(&mut self, field: CanonicalField, raw: &str) {
        let normalized = normalize_text(raw);
        if normalized.is_empty() {
            return;
        }
        let spellings = self.entries.entry(field).or_default();
        if !spellings.contains(&normalized) {
            spellings.push(normalized);
        }
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Extra header spellings keyed by camelCase field name.
///
/// Read from JSON such as `{"phone": ["handy", "simu"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymOverrides {
    pub fields: BTreeMap<String, Vec<String>>,
}

impl SynonymOverrides {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MapError::InvalidOverrides {
            message: e.to_string(),
        })
    }

    /// Loads overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| MapError::OverridesRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&contents)
    }
}

/// Short forms tried only when no synonym scored well for a field.
pub fn abbreviations(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::Name => &["nm", "fname", "lname", "jina"],
        CanonicalField::Phone => &["ph", "p", "tel", "mobile", "mob", "cell"],
        CanonicalField::Whatsapp => &["wa", "wapp", "whats"],
        CanonicalField::Gender => &["sx", "gndr", "jinsia"],
        CanonicalField::City => &["town", "mji", "region"],
        CanonicalField::Notes => &["note", "memo", "rmk", "comment"],
        CanonicalField::LoyaltyLevel => &["lvl", "loyal"],
        CanonicalField::ColorTag => &["colour", "color", "label"],
        CanonicalField::BirthMonth => &["bmonth", "mth", "mon"],
        CanonicalField::BirthDay => &["bday", "bd"],
        CanonicalField::ReferralSource => &["ref", "src", "channel"],
        CanonicalField::ReferralSourceCustom => &["other source", "ref other"],
        CanonicalField::LocationDescription => &["addr", "street", "landmark"],
        CanonicalField::NationalId => &["nid", "nida", "passport"],
        CanonicalField::ReferredBy => &["ref by", "introducer"],
        CanonicalField::TotalSpent => &["spend", "ttl", "revenue"],
        CanonicalField::Points => &["pts", "pt"],
        CanonicalField::IsActive => &["enabled", "act"],
        CanonicalField::ProfileImage => &["img", "pic", "photo url"],
        CanonicalField::Birthday => &["dob", "bdate"],
        CanonicalField::Email => &["eml", "e mail"],
        CanonicalField::Id => &["uid", "guid"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_are_complete() {
        let table = SynonymTable::builtin();
        for field in CanonicalField::ALL {
            let synonyms = table.synonyms(field);
            assert!(!synonyms.is_empty(), "{field} has no synonyms");
            let literal = field.as_str().to_lowercase();
            assert!(
                synonyms.contains(&literal),
                "{field} synonyms must contain '{literal}'"
            );
        }
    }

    #[test]
    fn builtin_spellings_are_normalized() {
        let table = SynonymTable::builtin();
        assert!(
            table
                .synonyms(CanonicalField::Phone)
                .contains(&"phone 1 value".to_string())
        );
        assert!(
            table
                .synonyms(CanonicalField::Gender)
                .contains(&"male female".to_string())
        );
    }

    #[test]
    fn from_entries_dedupes_and_skips_blanks() {
        let table = SynonymTable::from_entries([(
            CanonicalField::Phone,
            vec!["Mobile", "mobile", "  ", "Cell-Phone"],
        )]);
        assert_eq!(
            table.synonyms(CanonicalField::Phone),
            &["mobile".to_string(), "cell phone".to_string()]
        );
        assert!(table.synonyms(CanonicalField::Name).is_empty());
        assert_eq!(table.fields().collect::<Vec<_>>(), vec![CanonicalField::Phone]);
    }

    #[test]
    fn overrides_append_spellings() {
        let overrides = SynonymOverrides::from_json_str(r#"{"phone": ["Simu", "mobile"]}"#).unwrap();
        let table = SynonymTable::builtin().with_overrides(&overrides).unwrap();
        let phone = table.synonyms(CanonicalField::Phone);
        assert_eq!(phone.last().map(String::as_str), Some("simu"));
        assert_eq!(phone.iter().filter(|s| s.as_str() == "mobile").count(), 1);
    }

    #[test]
    fn overrides_reject_unknown_fields() {
        let overrides = SynonymOverrides::from_json_str(r#"{"shoeSize": ["size"]}"#).unwrap();
        let err = SynonymTable::builtin().with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, MapError::UnknownField(name) if name == "shoeSize"));
    }

    #[test]
    fn overrides_reject_bad_json() {
        assert!(matches!(
            SynonymOverrides::from_json_str("[1, 2]"),
            Err(MapError::InvalidOverrides { .. })
        ));
    }

    #[test]
    fn every_field_has_abbreviations() {
        for field in CanonicalField::ALL {
            assert!(!abbreviations(field).is_empty(), "{field}");
        }
        assert!(abbreviations(CanonicalField::Phone).contains(&"mob"));
    }
}
