//! Voter Roll Household Engine
//!
//! Infers household family trees from the relative declarations printed on
//! a voter roll, flags influential households and aggregates demographics.
//! Pure and synchronous: callers hand in materialized records and get
//! freshly built views back.

pub mod components;
pub mod config;
pub mod error;
pub mod interchange;
pub mod names;
pub mod roll;
pub mod synthetic;
pub mod systems;
pub mod tree;

#[cfg(feature = "node")]
pub mod napi_bindings;

pub use components::*;
pub use config::AnalysisConfig;
pub use error::RollError;
pub use interchange::{parse_records, to_json, AnalysisDocument};
pub use roll::{Roll, RollSummary};
pub use systems::{AnnotatedVoter, Demographics, DemographicsView, FilterMode, ResolutionReport};
pub use tree::{FamilyNode, Household};
