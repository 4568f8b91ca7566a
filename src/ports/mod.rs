//! Port traits implemented by [`crate::adapters`].

pub mod chart_port;
pub mod config_port;
pub mod data_port;
