//! Core domain types and logic.

pub mod analysis;
pub mod asset;
pub mod chart;
pub mod config_validation;
pub mod dataset;
pub mod error;
pub mod normalize;
pub mod regression;
pub mod settings;
pub mod units;
