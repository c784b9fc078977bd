//! Filter Engine
//!
//! Named predicates over the flattened, sorted voter list.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::components::{Gender, HouseKey};
use crate::config::AnalysisConfig;
use crate::error::RollError;
use crate::systems::flatten::AnnotatedVoter;
use crate::tree::Household;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Senior,
    Youth,
    Women,
    LargeFamily,
    Influencer,
}

impl FilterMode {
    pub const ALL_MODES: [FilterMode; 6] = [
        FilterMode::All,
        FilterMode::Senior,
        FilterMode::Youth,
        FilterMode::Women,
        FilterMode::LargeFamily,
        FilterMode::Influencer,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Senior => "senior",
            FilterMode::Youth => "youth",
            FilterMode::Women => "women",
            FilterMode::LargeFamily => "large_family",
            FilterMode::Influencer => "influencer",
        }
    }
}

impl FromStr for FilterMode {
    type Err = RollError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let key = key.trim();
        Self::ALL_MODES
            .into_iter()
            .find(|mode| mode.key() == key)
            .ok_or_else(|| RollError::UnknownFilter(key.to_string()))
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Voters matching `mode`, in the order given.
///
/// `large_family` counts household sizes over the whole `voters` slice on
/// every call, independent of any other filter.
pub fn apply_filter<'a>(
    voters: &'a [AnnotatedVoter],
    mode: FilterMode,
    config: &AnalysisConfig,
) -> Vec<&'a AnnotatedVoter> {
    match mode {
        FilterMode::All => voters.iter().collect(),
        FilterMode::Senior => voters
            .iter()
            .filter(|v| v.record.age_years() >= config.senior_age)
            .collect(),
        FilterMode::Youth => voters
            .iter()
            .filter(|v| config.youth_ages.contains(v.record.age_years()))
            .collect(),
        FilterMode::Women => voters
            .iter()
            .filter(|v| v.record.gender() == Gender::Female)
            .collect(),
        FilterMode::LargeFamily => {
            let sizes = household_sizes(voters);
            voters
                .iter()
                .filter(|v| sizes.get(&v.household).copied().unwrap_or(0) >= config.large_family_min)
                .collect()
        }
        FilterMode::Influencer => voters.iter().filter(|v| v.is_influencer).collect(),
    }
}

fn household_sizes(voters: &[AnnotatedVoter]) -> HashMap<&HouseKey, usize> {
    let mut sizes = HashMap::new();
    for voter in voters {
        *sizes.entry(&voter.household).or_insert(0) += 1;
    }
    sizes
}

/// Households holding at least one of `filtered`, in house-key order.
pub fn families_for<'h>(
    households: &'h BTreeMap<HouseKey, Household>,
    filtered: &[&AnnotatedVoter],
) -> Vec<&'h Household> {
    let relevant: HashSet<&HouseKey> = filtered.iter().map(|v| &v.household).collect();
    households
        .iter()
        .filter(|(house_no, _)| relevant.contains(house_no))
        .map(|(_, household)| household)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{NodeRole, VoterRecord};

    fn row(id: u64, house: &str, age: Option<u32>, gender: &str) -> AnnotatedVoter {
        let mut record = VoterRecord::new(id, format!("Voter {id}")).with_gender(gender).with_house(house);
        record.age = age;
        AnnotatedVoter {
            household: record.house_key(),
            record,
            role: NodeRole::Root,
            is_root: true,
            is_influencer: false,
            influence_score: None,
        }
    }

    fn ids(voters: &[&AnnotatedVoter]) -> Vec<String> {
        voters.iter().map(|v| v.record.id.0.clone()).collect()
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("large_family".parse::<FilterMode>().unwrap(), FilterMode::LargeFamily);
        assert_eq!("all".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert!(matches!("elderly".parse::<FilterMode>(), Err(RollError::UnknownFilter(_))));
        for mode in FilterMode::ALL_MODES {
            assert_eq!(mode.key().parse::<FilterMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_age_filters() {
        let voters = vec![
            row(1, "1", Some(17), "Male"),
            row(2, "1", Some(18), "Male"),
            row(3, "1", Some(25), "Female"),
            row(4, "1", Some(26), "Female"),
            row(5, "1", Some(60), "Male"),
            row(6, "1", None, "Male"),
        ];
        let config = AnalysisConfig::default();

        assert_eq!(ids(&apply_filter(&voters, FilterMode::Youth, &config)), ["2", "3"]);
        assert_eq!(ids(&apply_filter(&voters, FilterMode::Senior, &config)), ["5"]);
        assert_eq!(apply_filter(&voters, FilterMode::All, &config).len(), 6);
    }

    #[test]
    fn test_women_filter_is_exact() {
        let voters = vec![row(1, "1", None, "Female"), row(2, "1", None, "female"), row(3, "1", None, "Male")];
        assert_eq!(
            ids(&apply_filter(&voters, FilterMode::Women, &AnalysisConfig::default())),
            ["1"]
        );
    }

    #[test]
    fn test_large_family_counts_whole_list() {
        let mut voters: Vec<AnnotatedVoter> = (1..=5).map(|id| row(id, "7", Some(30), "Male")).collect();
        voters.extend((6..=9).map(|id| row(id, "8", Some(30), "Male")));
        voters.push(row(10, "", None, "Male"));

        let large = apply_filter(&voters, FilterMode::LargeFamily, &AnalysisConfig::default());
        assert_eq!(ids(&large), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_influencer_filter() {
        let mut voters = vec![row(1, "1", None, "Male"), row(2, "1", None, "Female")];
        voters[0].is_influencer = true;
        voters[0].influence_score = Some(4);

        assert_eq!(
            ids(&apply_filter(&voters, FilterMode::Influencer, &AnalysisConfig::default())),
            ["1"]
        );
    }
}
