//! N-API bindings for Node.js
//!
//! JSON in, JSON out, so the web front end can hand over the rows it
//! fetched and render whatever comes back.

use napi_derive::napi;

use crate::config::AnalysisConfig;
use crate::error::RollError;
use crate::interchange::{parse_records, to_json, AnalysisDocument};
use crate::roll::Roll;
use crate::systems::{Demographics, FilterMode};

fn to_napi(err: RollError) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

fn load(records_json: &str, config_json: Option<&str>) -> Result<Roll, RollError> {
    let records = parse_records(records_json)?;
    let config = match config_json {
        Some(json) => AnalysisConfig::from_json(json)?,
        None => AnalysisConfig::default(),
    };
    Roll::analyze(&records, config)
}

/// Full analysis document: summary, household trees, voters, demographics.
#[napi]
pub fn analyze_roll(records_json: String, config_json: Option<String>) -> napi::Result<String> {
    let roll = load(&records_json, config_json.as_deref()).map_err(to_napi)?;
    to_json(&AnalysisDocument::from(&roll)).map_err(to_napi)
}

/// Flattened voters matching one named filter.
#[napi]
pub fn filter_voters(records_json: String, filter: String) -> napi::Result<String> {
    let mode: FilterMode = filter.parse().map_err(to_napi)?;
    let roll = load(&records_json, None).map_err(to_napi)?;
    to_json(&roll.filter(mode)).map_err(to_napi)
}

/// Chart-ready demographics over every record handed in.
#[napi]
pub fn demographics(records_json: String) -> napi::Result<String> {
    let records = parse_records(&records_json).map_err(to_napi)?;
    let stats = Demographics::compute(&records, &AnalysisConfig::default());
    to_json(&stats.chart()).map_err(to_napi)
}
