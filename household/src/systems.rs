//! Analysis systems - each stage of the household pipeline
//!
//! Resolve relatives, assemble forests, score influence, then derive the
//! flattened list, demographics and filtered views from the result.

pub mod resolve;
pub mod assemble;
pub mod influence;
pub mod flatten;
pub mod demographics;
pub mod filter;

pub use resolve::{resolve_household, ResolutionReport};
pub use assemble::{assemble_household, assemble_households};
pub use influence::{score_household, tree_size};
pub use flatten::{flatten_households, sort_voters, AnnotatedVoter};
pub use demographics::{Demographics, DemographicsView, GenderCounts, NamedCount, NamedValue};
pub use filter::{apply_filter, families_for, FilterMode};
