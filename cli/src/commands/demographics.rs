use anyhow::anyhow;
use household::to_json;

use crate::state::{AppState, DemographicsData};

/// Whole-roll demographics, or one household's when `household` is given.
pub fn demographics(state: &AppState, household: Option<&str>) -> anyhow::Result<String> {
    let stats = match household {
        Some(house) => state
            .roll
            .household_demographics(house)
            .ok_or_else(|| anyhow!("no household {house:?} in this roll"))?,
        None => state.roll.demographics(),
    };

    Ok(to_json(&DemographicsData {
        household,
        total: stats.total,
        chart: stats.chart(),
    })?)
}
