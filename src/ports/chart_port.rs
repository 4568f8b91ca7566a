//! Chart output port trait.

use crate::domain::chart::Chart;
use crate::domain::error::AurumError;

/// Port for presenting a chart, either on screen or as a file.
pub trait ChartPort {
    /// `file_stem` names the chart (e.g. `sp500_usd`); file-backed
    /// implementations append their own extension.
    fn present(&self, chart: &Chart, file_stem: &str) -> Result<(), AurumError>;
}
