//! Typed customer drafts built from imported records.
//!
//! A draft is what the import hands to persistence after value
//! normalization. It is never written by this workspace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loyalty tier; new customers start at bronze.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyLevel {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyLevel::Bronze => "bronze",
            LoyaltyLevel::Silver => "silver",
            LoyaltyLevel::Gold => "gold",
            LoyaltyLevel::Platinum => "platinum",
        }
    }
}

impl fmt::Display for LoyaltyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LoyaltyLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bronze" => Ok(LoyaltyLevel::Bronze),
            "silver" => Ok(LoyaltyLevel::Silver),
            "gold" => Ok(LoyaltyLevel::Gold),
            "platinum" => Ok(LoyaltyLevel::Platinum),
            _ => Err(ModelError::InvalidValue {
                field: "loyaltyLevel",
                value: s.to_string(),
            }),
        }
    }
}

/// Customer marker shown in lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    #[default]
    New,
    Vip,
    Complainer,
    Purchased,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::New => "new",
            ColorTag::Vip => "vip",
            ColorTag::Complainer => "complainer",
            ColorTag::Purchased => "purchased",
        }
    }

    /// Maps free-text tags onto the four known tags. Unknown text is `New`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "vip" | "premium" | "important" | "priority" => ColorTag::Vip,
            "complainer" | "problem" | "issue" => ColorTag::Complainer,
            "purchased" | "buyer" | "customer" | "buying" => ColorTag::Purchased,
            _ => ColorTag::New,
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized customer ready to be persisted by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    /// Phone in international form (`+255...` or `255...`), empty if absent.
    pub phone: String,
    pub whatsapp: String,
    pub gender: Gender,
    pub city: String,
    pub notes: String,
    /// `None` when the source held a value that is not a known tier.
    pub loyalty_level: Option<LoyaltyLevel>,
    pub color_tag: ColorTag,
    pub birth_month: String,
    pub birth_day: String,
    pub referral_source: String,
    pub referral_source_custom: String,
    pub location_description: String,
    pub national_id: String,
    pub referred_by: String,
    pub total_spent: f64,
    pub points: i64,
    pub is_active: bool,
    pub profile_image: String,
    pub email: String,
    pub id: String,
}
