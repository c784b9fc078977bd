use std::collections::BTreeMap;

use household::{to_json, FilterMode};

use crate::state::AppState;

/// Every household keyed by house number, in natural order.
pub fn households(state: &AppState) -> anyhow::Result<String> {
    let views: BTreeMap<&str, _> = state
        .roll
        .households()
        .iter()
        .map(|(house_no, household)| (house_no.as_str(), household.nested()))
        .collect();
    Ok(to_json(&views)?)
}

pub fn families(state: &AppState, filter: FilterMode) -> anyhow::Result<String> {
    let families = state.roll.families(filter);
    Ok(to_json(&families)?)
}
