//! aurum: long-run growth of asset prices, in dollars and in gold.
//!
//! Hexagonal layout: pure data and numeric logic in [`domain`], port traits
//! in [`ports`], file and terminal implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
