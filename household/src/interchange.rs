//! JSON interchange with the data store and the front end
//!
//! Reads voter rows as exported by the store (or an extracted roll wrapped
//! in `{ "voters": [...] }`) and writes the derived views back out.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::components::VoterRecord;
use crate::error::RollError;
use crate::roll::{Roll, RollSummary};
use crate::systems::{AnnotatedVoter, DemographicsView};
use crate::tree::HouseholdView;

/// Schema version of [`AnalysisDocument`]
pub const DOCUMENT_VERSION: u8 = 1;

/// Parse a roll: either a bare array of rows or an object with a `voters` array.
pub fn parse_records(json: &str) -> Result<Vec<VoterRecord>, RollError> {
    let rows = match serde_json::from_str::<Value>(json)? {
        rows @ Value::Array(_) => rows,
        Value::Object(mut object) => object
            .remove("voters")
            .filter(Value::is_array)
            .ok_or_else(|| RollError::InvalidRoll("object roll has no \"voters\" array".to_string()))?,
        other => {
            return Err(RollError::InvalidRoll(format!(
                "expected an array of voters, got {}",
                kind_of(&other)
            )))
        }
    };
    Ok(serde_json::from_value(rows)?)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RollError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Every view of one analysis in a single payload for the front end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument<'a> {
    pub version: u8,
    pub summary: RollSummary,
    pub households: BTreeMap<&'a str, HouseholdView<'a>>,
    pub voters: &'a [AnnotatedVoter],
    pub demographics: DemographicsView,
}

impl<'a> From<&'a Roll> for AnalysisDocument<'a> {
    fn from(roll: &'a Roll) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            summary: roll.summary(),
            households: roll
                .households()
                .iter()
                .map(|(house_no, household)| (house_no.as_str(), household.nested()))
                .collect(),
            voters: roll.voters(),
            demographics: roll.demographics().chart(),
        }
    }
}
