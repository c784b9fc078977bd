use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use household::{parse_records, AnalysisConfig, Roll, RollSummary};
use serde::Serialize;

/// A voter roll read from disk and analyzed
pub struct AppState {
    pub roll: Roll,
}

impl AppState {
    pub fn load(path: &Path, config: AnalysisConfig) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading voter roll {}", path.display()))?;
        let records = parse_records(&json)
            .with_context(|| format!("parsing voter roll {}", path.display()))?;
        let roll = Roll::analyze(&records, config)
            .with_context(|| format!("analyzing voter roll {}", path.display()))?;
        Ok(Self { roll })
    }
}

/// Config from `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    AnalysisConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
}

// -- Serializable types returned by commands --

#[derive(Serialize)]
pub struct ReportData {
    #[serde(flatten)]
    pub summary: RollSummary,
    pub filters: BTreeMap<&'static str, usize>,
}

#[derive(Serialize)]
pub struct DemographicsData<'a> {
    pub household: Option<&'a str>,
    pub total: usize,
    #[serde(flatten)]
    pub chart: household::DemographicsView,
}
