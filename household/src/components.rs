//! Voter roll data model
//!
//! Input records exactly as the data store delivers them, plus the small
//! value types the resolver and aggregators derive from them.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::names::natural_cmp;

/// Group key for records without a usable house number.
pub const UNKNOWN_HOUSE: &str = "Unknown";

// ============================================================================
// Identity
// ============================================================================

/// Input record identifier, unique within one roll.
///
/// Store rows carry integer ids while extracted rolls carry strings, so
/// both are accepted and compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(RecordId(text)),
            Value::Number(number) => Ok(RecordId(number.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "record id must be a number or string, got {other}"
            ))),
        }
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a node inside its household's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

// ============================================================================
// Voter record
// ============================================================================

/// One row of the voter roll. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Age in years. Absent or unreadable values are `None`.
    #[serde(default, deserialize_with = "lenient_age", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voter_id: Option<String>,
}

impl VoterRecord {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            gender: None,
            house_number: None,
            relative_name: None,
            relative_type: None,
            voter_id: None,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_house(mut self, house_number: impl Into<String>) -> Self {
        self.house_number = Some(house_number.into());
        self
    }

    pub fn with_relative(mut self, name: impl Into<String>, relative_type: impl Into<String>) -> Self {
        self.relative_name = Some(name.into());
        self.relative_type = Some(relative_type.into());
        self
    }

    pub fn with_voter_id(mut self, voter_id: impl Into<String>) -> Self {
        self.voter_id = Some(voter_id.into());
        self
    }

    /// Age in years, 0 when absent.
    pub fn age_years(&self) -> u32 {
        self.age.unwrap_or(0)
    }

    pub fn gender(&self) -> Gender {
        Gender::parse(self.gender.as_deref())
    }

    pub fn house_key(&self) -> HouseKey {
        HouseKey::from_raw(self.house_number.as_deref())
    }

    /// Declared relative name, if present and not blank.
    pub fn relative_name(&self) -> Option<&str> {
        self.relative_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn relative_type(&self) -> Option<RelativeType> {
        self.relative_type.as_deref().and_then(RelativeType::parse)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts integers, integral floats and OCR-ish strings ("4 5", "45 yrs").
/// Anything else becomes `None` rather than an error.
fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let age = match Value::deserialize(deserializer)? {
        Value::Number(number) => match number.as_u64() {
            Some(years) => u32::try_from(years).ok(),
            None => number
                .as_f64()
                .filter(|years| years.is_finite() && *years >= 0.0 && years.fract() == 0.0)
                .filter(|years| *years <= f64::from(u32::MAX))
                .map(|years| years as u32),
        },
        Value::String(text) => {
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    };
    Ok(age)
}

// ============================================================================
// Gender
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Only the exact canonical spellings count as Male/Female.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Male") => Gender::Male,
            Some("Female") => Gender::Female,
            _ => Gender::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Relationships
// ============================================================================

/// Relationship label printed on the roll next to the relative's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeType {
    Husbands,
    Wives,
    Fathers,
    Mothers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Spousal,
    ParentChild,
}

impl RelativeType {
    /// Exact labels only; "FATHERS" or " Fathers" are unresolvable.
    pub fn parse(raw: &str) -> Option<Self> {
        [
            RelativeType::Husbands,
            RelativeType::Wives,
            RelativeType::Fathers,
            RelativeType::Mothers,
        ]
        .into_iter()
        .find(|kind| kind.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeType::Husbands => "Husbands",
            RelativeType::Wives => "Wives",
            RelativeType::Fathers => "Fathers",
            RelativeType::Mothers => "Mothers",
        }
    }

    pub fn relation(&self) -> Relation {
        match self {
            RelativeType::Husbands | RelativeType::Wives => Relation::Spousal,
            RelativeType::Fathers | RelativeType::Mothers => Relation::ParentChild,
        }
    }

    /// Whether a candidate of this gender can be the declared relative.
    /// Unknown genders are never excluded.
    pub fn admits(&self, candidate: Gender) -> bool {
        match self {
            RelativeType::Husbands | RelativeType::Fathers => candidate != Gender::Female,
            RelativeType::Wives | RelativeType::Mothers => candidate != Gender::Male,
        }
    }
}

/// Position of a node inside its household forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Root,
    Spouse,
    Child,
}

// ============================================================================
// Household key
// ============================================================================

/// Normalized house-number token. Orders naturally, so "9" < "10" < "Unknown".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseKey(String);

impl HouseKey {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(house) if !house.is_empty() => HouseKey(house.to_string()),
            _ => HouseKey(UNKNOWN_HOUSE.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_HOUSE
    }
}

impl Ord for HouseKey {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for HouseKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HouseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
