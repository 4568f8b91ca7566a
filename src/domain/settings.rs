//! Resolved settings for one run, after merging CLI flags over config.

use std::path::PathBuf;

use crate::domain::analysis::ViewSelection;
use crate::domain::dataset::DEFAULT_GOLD_KEY;

pub const DEFAULT_DATA_PATH: &str = "prices.json";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub log_scale: bool,
    pub terminal_width: usize,
    pub terminal_height: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            log_scale: true,
            terminal_width: 72,
            terminal_height: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Draw charts on stdout.
    Display,
    /// Write one SVG file per chart.
    Files,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub data_path: PathBuf,
    pub gold_key: String,
    pub since: Option<i32>,
    pub views: ViewSelection,
    pub output: OutputMode,
    pub output_dir: PathBuf,
    pub chart: ChartSettings,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            gold_key: DEFAULT_GOLD_KEY.to_string(),
            since: None,
            views: ViewSelection::from_flags(false, false),
            output: OutputMode::Display,
            output_dir: PathBuf::from("."),
            chart: ChartSettings::default(),
        }
    }
}
