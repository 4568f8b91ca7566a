//! Concrete adapter implementations for ports.

pub mod chart_svg;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod json_data_adapter;
pub mod svg_file_adapter;
pub mod terminal_chart_adapter;
