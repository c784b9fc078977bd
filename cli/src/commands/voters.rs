use household::{to_json, FilterMode};
use tracing::info;

use crate::state::AppState;

pub fn voters(state: &AppState, filter: FilterMode) -> anyhow::Result<String> {
    let voters = state.roll.filter(filter);
    info!(filter = %filter, matched = voters.len(), total = state.roll.voters().len(), "voters filtered");
    Ok(to_json(&voters)?)
}
