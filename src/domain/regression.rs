//! Semi-log growth fits.
//!
//! Fits `log10(price) = intercept + slope * year` by ordinary least squares
//! and converts the slope to a compounding annual rate, `10^slope - 1`.

use crate::domain::asset::{Period, PriceSeries};
use crate::domain::error::AurumError;

pub const MIN_FIT_POINTS: usize = 2;

/// A fitted exponential trend over one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthFit {
    pub intercept: f64,
    pub slope: f64,
    /// Compound growth per year, e.g. `0.07` for 7%.
    pub growth_rate: f64,
    pub start: Period,
    pub end: Period,
    /// Trend value at every period of the fitted series.
    pub predicted: Vec<(Period, f64)>,
}

impl GrowthFit {
    /// Trend value at an arbitrary fractional year.
    pub fn value_at(&self, year: f64) -> f64 {
        10f64.powf(self.intercept + self.slope * year)
    }
}

pub fn fit_growth(asset: &str, series: &PriceSeries) -> Result<GrowthFit, AurumError> {
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|(p, price)| (p.fractional_year(), price.log10()))
        .collect();

    let insufficient = || AurumError::InsufficientData {
        asset: asset.to_string(),
        points: points.len(),
        minimum: MIN_FIT_POINTS,
    };

    if points.len() < MIN_FIT_POINTS {
        return Err(insufficient());
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });

    if sxx <= 0.0 {
        return Err(insufficient());
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let (start, _) = series.first().ok_or_else(insufficient)?;
    let (end, _) = series.last().ok_or_else(insufficient)?;

    let mut fit = GrowthFit {
        intercept,
        slope,
        growth_rate: 10f64.powf(slope) - 1.0,
        start,
        end,
        predicted: Vec::new(),
    };
    fit.predicted = series
        .iter()
        .map(|(p, _)| (p, fit.value_at(p.fractional_year())))
        .collect();
    Ok(fit)
}
