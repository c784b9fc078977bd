pub mod config;
pub mod demographics;
pub mod households;
pub mod report;
pub mod voters;
