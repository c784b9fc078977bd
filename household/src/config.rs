//! Analysis configuration
//!
//! Every field has a default reproducing the fixed constants the front end
//! was built against, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::RollError;

/// Minimum household tree size for a root to count as an influencer.
pub const DEFAULT_INFLUENCE_THRESHOLD: u32 = 4;

/// Minimum household size matched by the `large_family` filter.
pub const DEFAULT_LARGE_FAMILY_MIN: usize = 5;

pub const DEFAULT_SENIOR_AGE: u32 = 60;

pub const DEFAULT_SURNAME_LIMIT: usize = 10;

/// Surnames of two letters or fewer are initials, not family names.
pub const DEFAULT_SURNAME_MIN_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub influence_threshold: u32,
    pub large_family_min: usize,
    pub senior_age: u32,
    pub youth_ages: AgeRange,
    pub age_buckets: Vec<AgeBucket>,
    pub surname_limit: usize,
    pub surname_min_len: usize,
}

/// Inclusive age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

/// Named age bucket; `max: None` is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub label: String,
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
}

impl AgeBucket {
    pub fn new(label: &str, min: u32, max: Option<u32>) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && self.max.map_or(true, |max| age <= max)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            influence_threshold: DEFAULT_INFLUENCE_THRESHOLD,
            large_family_min: DEFAULT_LARGE_FAMILY_MIN,
            senior_age: DEFAULT_SENIOR_AGE,
            youth_ages: AgeRange { min: 18, max: 25 },
            // "60+" starts at 61 because "46-60" already includes 60
            age_buckets: vec![
                AgeBucket::new("18-29", 18, Some(29)),
                AgeBucket::new("30-45", 30, Some(45)),
                AgeBucket::new("46-60", 46, Some(60)),
                AgeBucket::new("60+", 61, None),
            ],
            surname_limit: DEFAULT_SURNAME_LIMIT,
            surname_min_len: DEFAULT_SURNAME_MIN_LEN,
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON config, filling omitted fields with defaults, and validate it.
    pub fn from_json(json: &str) -> Result<Self, RollError> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RollError> {
        if self.influence_threshold == 0 {
            return Err(invalid("influence_threshold must be at least 1"));
        }
        if self.large_family_min == 0 {
            return Err(invalid("large_family_min must be at least 1"));
        }
        if self.surname_limit == 0 {
            return Err(invalid("surname_limit must be at least 1"));
        }
        if self.youth_ages.min > self.youth_ages.max {
            return Err(invalid(format!(
                "youth_ages min {} exceeds max {}",
                self.youth_ages.min, self.youth_ages.max
            )));
        }
        if self.age_buckets.is_empty() {
            return Err(invalid("age_buckets must not be empty"));
        }

        for bucket in &self.age_buckets {
            if bucket.max.is_some_and(|max| max < bucket.min) {
                return Err(invalid(format!("age bucket '{}' is inverted", bucket.label)));
            }
        }

        let mut ordered: Vec<&AgeBucket> = self.age_buckets.iter().collect();
        ordered.sort_by_key(|bucket| bucket.min);
        for pair in ordered.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if lower.max.map_or(true, |max| max >= upper.min) {
                return Err(invalid(format!(
                    "age buckets '{}' and '{}' overlap",
                    lower.label, upper.label
                )));
            }
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> RollError {
    RollError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.influence_threshold, 4);
        assert_eq!(config.age_buckets.len(), 4);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = AnalysisConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = AnalysisConfig::from_json(r#"{"influence_threshold": 6, "senior_age": 65}"#).unwrap();
        assert_eq!(config.influence_threshold, 6);
        assert_eq!(config.senior_age, 65);
        assert_eq!(config.large_family_min, DEFAULT_LARGE_FAMILY_MIN);
    }

    #[test]
    fn test_bucket_boundaries() {
        let config = AnalysisConfig::default();
        let label_of = |age: u32| {
            config
                .age_buckets
                .iter()
                .find(|bucket| bucket.contains(age))
                .map(|bucket| bucket.label.as_str())
        };

        assert_eq!(label_of(17), None);
        assert_eq!(label_of(18), Some("18-29"));
        assert_eq!(label_of(60), Some("46-60"));
        assert_eq!(label_of(61), Some("60+"));
        assert_eq!(label_of(104), Some("60+"));
    }

    #[test]
    fn test_rejects_overlapping_buckets() {
        let config = AnalysisConfig {
            age_buckets: vec![
                AgeBucket::new("young", 18, Some(40)),
                AgeBucket::new("old", 40, None),
            ],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RollError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_open_bucket_before_another() {
        let config = AnalysisConfig {
            age_buckets: vec![AgeBucket::new("adults", 18, None), AgeBucket::new("seniors", 60, None)],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = AnalysisConfig::from_json(r#"{"influence_threshold": 0}"#).unwrap_err();
        assert!(err.to_string().contains("influence_threshold"));
    }
}
