//! Error type shared by every fallible engine operation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RollError {
    #[error("duplicate record id in roll: {id}")]
    DuplicateId { id: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown filter: {0} (expected one of all, senior, youth, women, large_family, influencer)")]
    UnknownFilter(String),

    #[error("unrecognized roll layout: {0}")]
    InvalidRoll(String),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}
