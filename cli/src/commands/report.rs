use household::{to_json, FilterMode};

use crate::state::{AppState, ReportData};

pub fn report(state: &AppState) -> anyhow::Result<String> {
    let filters = FilterMode::ALL_MODES
        .into_iter()
        .map(|mode| (mode.key(), state.roll.filter(mode).len()))
        .collect();

    Ok(to_json(&ReportData {
        summary: state.roll.summary(),
        filters,
    })?)
}
