//! Roll - main orchestrator
//!
//! Runs the whole pipeline over one materialized voter set and holds every
//! derived view. A `Roll` is rebuilt from scratch whenever its voter set
//! changes; nothing is patched incrementally.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::info;

use crate::components::{HouseKey, VoterRecord};
use crate::config::AnalysisConfig;
use crate::error::RollError;
use crate::systems::{
    apply_filter, assemble_households, families_for, flatten_households, score_household,
    AnnotatedVoter, Demographics, FilterMode, ResolutionReport,
};
use crate::tree::Household;

#[derive(Debug, Clone)]
pub struct Roll {
    config: AnalysisConfig,
    households: BTreeMap<HouseKey, Household>,
    voters: Vec<AnnotatedVoter>,
    report: ResolutionReport,
}

/// Headline counts for one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollSummary {
    pub records: usize,
    pub households: usize,
    pub roots: usize,
    pub influencers: usize,
    pub resolution: ResolutionReport,
}

impl Roll {
    /// Analyze `records` under `config`.
    ///
    /// Fails on an invalid config or when two records share an id; any other
    /// oddity in the data degrades to defaults instead of erroring.
    pub fn analyze(records: &[VoterRecord], config: AnalysisConfig) -> Result<Self, RollError> {
        config.validate()?;
        ensure_unique_ids(records)?;

        let mut report = ResolutionReport::default();
        let mut households = assemble_households(records, &mut report);

        let mut influencers = 0;
        for household in households.values_mut() {
            influencers += score_household(household, config.influence_threshold);
        }

        let voters = flatten_households(households.values());

        info!(
            records = records.len(),
            households = households.len(),
            influencers,
            linked = report.linked(),
            unmatched = report.unmatched,
            "roll analyzed"
        );

        Ok(Self {
            config,
            households,
            voters,
            report,
        })
    }

    pub fn with_defaults(records: &[VoterRecord]) -> Result<Self, RollError> {
        Self::analyze(records, AnalysisConfig::default())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Per-household forests, naturally ordered by house key.
    pub fn households(&self) -> &BTreeMap<HouseKey, Household> {
        &self.households
    }

    /// Look up a household by raw house number (trimmed; blank means "Unknown").
    pub fn household(&self, house_number: &str) -> Option<&Household> {
        self.households.get(&HouseKey::from_raw(Some(house_number)))
    }

    /// Every voter in canonical presentation order.
    pub fn voters(&self) -> &[AnnotatedVoter] {
        &self.voters
    }

    pub fn report(&self) -> &ResolutionReport {
        &self.report
    }

    pub fn filter(&self, mode: FilterMode) -> Vec<&AnnotatedVoter> {
        apply_filter(&self.voters, mode, &self.config)
    }

    /// Households touched by `mode`, as the family view lists them.
    pub fn families(&self, mode: FilterMode) -> Vec<&Household> {
        families_for(&self.households, &self.filter(mode))
    }

    pub fn demographics(&self) -> Demographics {
        Demographics::compute(self.voters.iter().map(|v| &v.record), &self.config)
    }

    pub fn household_demographics(&self, house_number: &str) -> Option<Demographics> {
        self.household(house_number)
            .map(|household| Demographics::compute(household.nodes().iter().map(|n| &n.record), &self.config))
    }

    pub fn summary(&self) -> RollSummary {
        RollSummary {
            records: self.voters.len(),
            households: self.households.len(),
            roots: self.households.values().map(|h| h.tree().len()).sum(),
            influencers: self.voters.iter().filter(|v| v.is_influencer).count(),
            resolution: self.report,
        }
    }
}

fn ensure_unique_ids(records: &[VoterRecord]) -> Result<(), RollError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(&record.id) {
            return Err(RollError::DuplicateId {
                id: record.id.to_string(),
            });
        }
    }
    Ok(())
}
