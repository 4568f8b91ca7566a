//! Renderer-independent chart description.

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::asset::{AssetRecord, Granularity, Period};
use crate::domain::regression::GrowthFit;
use crate::domain::units::{format_growth_rate, linear_ticks, log_ticks, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Years,
    Dates,
}

impl From<Granularity> for AxisKind {
    fn from(g: Granularity) -> Self {
        match g {
            Granularity::Yearly => AxisKind::Years,
            Granularity::Daily => AxisKind::Dates,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub label: String,
    pub color: String,
    /// (fractional year, value), ascending by x.
    pub points: Vec<(f64, f64)>,
    pub dashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub unit: Unit,
    pub x_axis: AxisKind,
    pub log_scale: bool,
    pub lines: Vec<ChartLine>,
}

impl Chart {
    /// Extent over all lines; `None` when there is nothing to draw.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.lines.iter().flat_map(|l| l.points.iter());
        let &(x0, y0) = points.next()?;
        let init = Bounds {
            x_min: x0,
            x_max: x0,
            y_min: y0,
            y_max: y0,
        };
        Some(points.fold(init, |b, &(x, y)| Bounds {
            x_min: b.x_min.min(x),
            x_max: b.x_max.max(x),
            y_min: b.y_min.min(y),
            y_max: b.y_max.max(y),
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.points.is_empty())
    }
}

/// A labelled position on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct XTick {
    /// Fractional year.
    pub x: f64,
    pub label: String,
}

/// Maps data coordinates to `[0, 1]` fractions of the plot area, with
/// `y = 0` at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub bounds: Bounds,
    pub log_scale: bool,
    pub x_axis: AxisKind,
    x_lo: f64,
    x_hi: f64,
    y_lo: f64,
    y_hi: f64,
}

const X_TICK_STEPS: [i32; 9] = [1, 2, 5, 10, 20, 25, 50, 100, 200];
const MONTH_TICK_STEPS: [i32; 10] = [1, 2, 3, 6, 12, 24, 60, 120, 240, 600];
const DAY_TICK_STEPS: [u64; 4] = [1, 2, 7, 14];
/// Spans up to this many days get day ticks, longer ones month ticks.
const MAX_DAY_TICK_SPAN: i64 = 60;
const MAX_X_TICKS: f64 = 10.0;

impl Scale {
    /// `None` for an empty chart. Log scale falls back to linear when any
    /// value is non-positive.
    pub fn for_chart(chart: &Chart) -> Option<Self> {
        let bounds = chart.bounds()?;
        let log_scale = chart.log_scale && bounds.y_min > 0.0;

        let (x_lo, x_hi) = widen(bounds.x_min, bounds.x_max, 0.5);
        let (y_lo, y_hi) = if log_scale {
            widen(bounds.y_min.log10(), bounds.y_max.log10(), 0.5)
        } else {
            let pad = ((bounds.y_max - bounds.y_min) * 0.05).max(f64::EPSILON);
            widen(bounds.y_min - pad, bounds.y_max + pad, 1.0)
        };

        Some(Self {
            bounds,
            log_scale,
            x_axis: chart.x_axis,
            x_lo,
            x_hi,
            y_lo,
            y_hi,
        })
    }

    pub fn x_fraction(&self, x: f64) -> f64 {
        (x - self.x_lo) / (self.x_hi - self.x_lo)
    }

    pub fn y_fraction(&self, y: f64) -> f64 {
        let v = if self.log_scale { y.log10() } else { y };
        (v - self.y_lo) / (self.y_hi - self.y_lo)
    }

    /// Inverse of [`Scale::y_fraction`].
    pub fn y_value(&self, fraction: f64) -> f64 {
        let v = self.y_lo + fraction * (self.y_hi - self.y_lo);
        if self.log_scale { 10f64.powf(v) } else { v }
    }

    pub fn y_ticks(&self) -> Vec<f64> {
        if self.log_scale {
            let ticks = log_ticks(10f64.powf(self.y_lo), 10f64.powf(self.y_hi));
            if ticks.len() >= 2 {
                return ticks;
            }
            // less than one 1-2-5 step visible
            return linear_ticks(10f64.powf(self.y_lo), 10f64.powf(self.y_hi), 4);
        }
        linear_ticks(self.y_lo, self.y_hi, 5)
    }

    /// At most ten ticks on a round step. Yearly charts get whole years.
    /// Daily charts get days (`%Y-%m-%d`) or months (`%Y-%m`), and years
    /// (`%Y`) once the span needs a step of a year or more.
    pub fn x_ticks(&self) -> Vec<XTick> {
        match self.x_axis {
            AxisKind::Years => year_ticks(self.x_lo, self.x_hi),
            AxisKind::Dates => date_ticks(self.x_lo, self.x_hi),
        }
    }
}

fn year_ticks(lo: f64, hi: f64) -> Vec<XTick> {
    let first = lo.ceil() as i32;
    let last = hi.floor() as i32;
    let span = (last - first).max(0) as f64;
    let step = X_TICK_STEPS
        .iter()
        .copied()
        .find(|s| span / *s as f64 <= MAX_X_TICKS)
        .unwrap_or(500);
    let start = first + (step - first.rem_euclid(step)) % step;
    (start..=last)
        .step_by(step as usize)
        .map(|year| XTick {
            x: year as f64,
            label: year.to_string(),
        })
        .collect()
}

fn date_ticks(lo: f64, hi: f64) -> Vec<XTick> {
    let (Some(mut first), Some(last)) = (date_at(lo), date_at(hi)) else {
        return Vec::new();
    };
    if x_of(first) < lo - 1e-9 {
        first = first.succ_opt().unwrap_or(first);
    }
    let days = (last - first).num_days();
    if days < 0 {
        return Vec::new();
    }

    if days <= MAX_DAY_TICK_SPAN {
        let step = DAY_TICK_STEPS
            .iter()
            .copied()
            .find(|s| days as f64 / *s as f64 <= MAX_X_TICKS)
            .unwrap_or(30);
        return std::iter::successors(Some(first), |d| d.checked_add_days(Days::new(step)))
            .take_while(|d| *d <= last)
            .map(|d| XTick {
                x: x_of(d),
                label: d.format("%Y-%m-%d").to_string(),
            })
            .collect();
    }

    let month_index = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
    let first_month = month_index(first) + if first.day() == 1 { 0 } else { 1 };
    let last_month = month_index(last);
    let span = (last_month - first_month).max(0) as f64;
    let step = MONTH_TICK_STEPS
        .iter()
        .copied()
        .find(|s| span / *s as f64 <= MAX_X_TICKS)
        .unwrap_or(1200);
    let start = first_month + (step - first_month.rem_euclid(step)) % step;
    let format = if step >= 12 { "%Y" } else { "%Y-%m" };

    (start..=last_month)
        .step_by(step as usize)
        .filter_map(|m| NaiveDate::from_ymd_opt(m.div_euclid(12), m.rem_euclid(12) as u32 + 1, 1))
        .map(|d| XTick {
            x: x_of(d),
            label: d.format(format).to_string(),
        })
        .collect()
}

fn x_of(date: NaiveDate) -> f64 {
    Period::Date(date).fractional_year()
}

/// Day containing fractional year `x`.
fn date_at(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > 200_000.0 {
        return None;
    }
    let year = x.floor() as i32;
    let days_in_year = if NaiveDate::from_ymd_opt(year, 12, 31)?.leap_year() {
        366.0
    } else {
        365.0
    };
    let ordinal0 = ((x - year as f64) * days_in_year + 1e-6).floor() as u32;
    NaiveDate::from_yo_opt(year, ordinal0.min(days_in_year as u32 - 1) + 1)
}

fn widen(lo: f64, hi: f64, by: f64) -> (f64, f64) {
    if hi - lo > f64::EPSILON {
        (lo, hi)
    } else {
        (lo - by, hi + by)
    }
}

/// Chart of one asset in its own unit, with its trend line when a fit exists.
pub fn asset_chart(asset: &AssetRecord, fit: Option<&GrowthFit>, log_scale: bool) -> Chart {
    let x_axis = asset
        .granularity()
        .map(AxisKind::from)
        .unwrap_or(AxisKind::Years);

    let mut lines = vec![ChartLine {
        label: asset.name.clone(),
        color: asset.color.clone(),
        points: to_points(asset.prices.iter()),
        dashed: false,
    }];

    if let Some(fit) = fit {
        lines.push(ChartLine {
            label: format!(
                "trend {} ({}-{})",
                format_growth_rate(fit.growth_rate),
                fit.start.year(),
                fit.end.year()
            ),
            color: asset.color.clone(),
            points: to_points(fit.predicted.iter().copied()),
            dashed: true,
        });
    }

    Chart {
        title: format!("{} in {}", asset.name, asset.unit),
        unit: asset.unit,
        x_axis,
        log_scale,
        lines,
    }
}

fn to_points(iter: impl Iterator<Item = (Period, f64)>) -> Vec<(f64, f64)> {
    iter.map(|(p, v)| (p.fractional_year(), v)).collect()
}

/// `<key>_<unit suffix>`, with spaces in the key replaced by underscores.
pub fn chart_file_stem(key: &str, unit: Unit) -> String {
    format!("{}_{}", key.replace(' ', "_"), unit.suffix())
}
