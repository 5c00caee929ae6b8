//! Canonical customer fields targeted by bulk import.
//!
//! A canonical field is the stable name the customer store expects,
//! independent of how a source file labels its columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The closed set of customer fields an import can fill.
///
/// Declaration order is significant: it is the order fields are listed,
/// serialized, and detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    Name,
    Phone,
    Whatsapp,
    Gender,
    City,
    Notes,
    LoyaltyLevel,
    ColorTag,
    BirthMonth,
    BirthDay,
    ReferralSource,
    ReferralSourceCustom,
    LocationDescription,
    NationalId,
    ReferredBy,
    TotalSpent,
    Points,
    IsActive,
    ProfileImage,
    Birthday,
    Email,
    Id,
}

impl CanonicalField {
    /// Number of canonical fields.
    pub const COUNT: usize = 22;

    /// Every field, in declaration order.
    pub const ALL: [CanonicalField; Self::COUNT] = [
        CanonicalField::Name,
        CanonicalField::Phone,
        CanonicalField::Whatsapp,
        CanonicalField::Gender,
        CanonicalField::City,
        CanonicalField::Notes,
        CanonicalField::LoyaltyLevel,
        CanonicalField::ColorTag,
        CanonicalField::BirthMonth,
        CanonicalField::BirthDay,
        CanonicalField::ReferralSource,
        CanonicalField::ReferralSourceCustom,
        CanonicalField::LocationDescription,
        CanonicalField::NationalId,
        CanonicalField::ReferredBy,
        CanonicalField::TotalSpent,
        CanonicalField::Points,
        CanonicalField::IsActive,
        CanonicalField::ProfileImage,
        CanonicalField::Birthday,
        CanonicalField::Email,
        CanonicalField::Id,
    ];

    /// Returns the camelCase name used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::Phone => "phone",
            CanonicalField::Whatsapp => "whatsapp",
            CanonicalField::Gender => "gender",
            CanonicalField::City => "city",
            CanonicalField::Notes => "notes",
            CanonicalField::LoyaltyLevel => "loyaltyLevel",
            CanonicalField::ColorTag => "colorTag",
            CanonicalField::BirthMonth => "birthMonth",
            CanonicalField::BirthDay => "birthDay",
            CanonicalField::ReferralSource => "referralSource",
            CanonicalField::ReferralSourceCustom => "referralSourceCustom",
            CanonicalField::LocationDescription => "locationDescription",
            CanonicalField::NationalId => "nationalId",
            CanonicalField::ReferredBy => "referredBy",
            CanonicalField::TotalSpent => "totalSpent",
            CanonicalField::Points => "points",
            CanonicalField::IsActive => "isActive",
            CanonicalField::ProfileImage => "profileImage",
            CanonicalField::Birthday => "birthday",
            CanonicalField::Email => "email",
            CanonicalField::Id => "id",
        }
    }

    /// Human-readable label for tables and messages.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::Name => "Name",
            CanonicalField::Phone => "Phone",
            CanonicalField::Whatsapp => "WhatsApp",
            CanonicalField::Gender => "Gender",
            CanonicalField::City => "City",
            CanonicalField::Notes => "Notes",
            CanonicalField::LoyaltyLevel => "Loyalty level",
            CanonicalField::ColorTag => "Color tag",
            CanonicalField::BirthMonth => "Birth month",
            CanonicalField::BirthDay => "Birth day",
            CanonicalField::ReferralSource => "Referral source",
            CanonicalField::ReferralSourceCustom => "Custom referral source",
            CanonicalField::LocationDescription => "Location description",
            CanonicalField::NationalId => "National ID",
            CanonicalField::ReferredBy => "Referred by",
            CanonicalField::TotalSpent => "Total spent",
            CanonicalField::Points => "Points",
            CanonicalField::IsActive => "Active",
            CanonicalField::ProfileImage => "Profile image",
            CanonicalField::Birthday => "Birthday",
            CanonicalField::Email => "Email",
            CanonicalField::Id => "ID",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = ModelError;

    /// Parses the camelCase field name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CanonicalField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownField(trimmed.to_string()))
    }
}
