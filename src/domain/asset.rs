//! Asset records and their price series.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::AurumError;
use crate::domain::units::Unit;

/// A point on an asset's time axis: a whole year, or a calendar day for
/// daily-granularity assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Year(i32),
    Date(NaiveDate),
}

impl Period {
    /// Accepts `YYYY` or `YYYY-MM-DD`.
    pub fn parse(asset: &str, raw: &str) -> Result<Self, AurumError> {
        let trimmed = raw.trim();
        if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(year) = trimmed.parse::<i32>() {
                return Ok(Period::Year(year));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Period::Date)
            .map_err(|_| AurumError::InvalidPeriod {
                asset: asset.to_string(),
                value: raw.to_string(),
            })
    }

    pub fn year(&self) -> i32 {
        match self {
            Period::Year(y) => *y,
            Period::Date(d) => d.year(),
        }
    }

    /// Position on a continuous year axis. Dates map to
    /// `year + (ordinal - 1) / days_in_year`.
    pub fn fractional_year(&self) -> f64 {
        match self {
            Period::Year(y) => *y as f64,
            Period::Date(d) => {
                let days_in_year = if d.leap_year() { 366.0 } else { 365.0 };
                d.year() as f64 + (d.ordinal0() as f64) / days_in_year
            }
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.fractional_year()
            .total_cmp(&other.fractional_year())
            .then_with(|| self.is_date().cmp(&other.is_date()))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Period {
    fn is_date(&self) -> bool {
        matches!(self, Period::Date(_))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(y) => write!(f, "{y}"),
            Period::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Yearly,
    Daily,
}

/// Ordered, strictly positive prices keyed by period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: BTreeMap<Period, f64>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, period: Period, price: f64) {
        self.points.insert(period, price);
    }

    pub fn get(&self, period: &Period) -> Option<f64> {
        self.points.get(period).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, f64)> + '_ {
        self.points.iter().map(|(p, v)| (*p, *v))
    }

    pub fn first(&self) -> Option<(Period, f64)> {
        self.points.first_key_value().map(|(p, v)| (*p, *v))
    }

    pub fn last(&self) -> Option<(Period, f64)> {
        self.points.last_key_value().map(|(p, v)| (*p, *v))
    }

    /// `None` for an empty series.
    pub fn granularity(&self) -> Option<Granularity> {
        self.first().map(|(p, _)| match p {
            Period::Year(_) => Granularity::Yearly,
            Period::Date(_) => Granularity::Daily,
        })
    }

    /// Keeps only periods on or after the start of `year`.
    pub fn since(&self, year: i32) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|(p, _)| p.fractional_year() >= year as f64)
                .map(|(p, v)| (*p, *v))
                .collect(),
        }
    }
}

impl FromIterator<(Period, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (Period, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// One asset as loaded from the price file, or derived from one.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub key: String,
    pub name: String,
    pub color: String,
    pub unit: Unit,
    pub prices: PriceSeries,
}

impl AssetRecord {
    pub fn granularity(&self) -> Option<Granularity> {
        self.prices.granularity()
    }

    pub fn since(&self, year: i32) -> Self {
        Self {
            prices: self.prices.since(year),
            ..self.clone()
        }
    }
}

/// Fallback colors, assigned by position in the price file.
pub const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

pub fn default_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Parses a dollar amount such as `"$1,234.56"`. The result must be finite
/// and strictly positive.
pub fn parse_price(asset: &str, period: &Period, raw: &str) -> Result<f64, AurumError> {
    let trimmed = raw.trim();
    let cleaned: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_start()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(AurumError::InvalidPrice {
            asset: asset.to_string(),
            period: period.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Builds a series from raw quotes, dropping every period before the first
/// one that carries a quote and skipping unquoted periods afterwards.
pub fn build_series(
    asset: &str,
    quotes: Vec<(Period, Option<f64>)>,
) -> Result<PriceSeries, AurumError> {
    let mut quotes = quotes;
    quotes.sort_by(|a, b| a.0.cmp(&b.0));

    let series: PriceSeries = quotes
        .into_iter()
        .skip_while(|(_, price)| price.is_none())
        .filter_map(|(period, price)| price.map(|p| (period, p)))
        .collect();

    let yearly = series.iter().any(|(p, _)| matches!(p, Period::Year(_)));
    let daily = series.iter().any(|(p, _)| matches!(p, Period::Date(_)));
    if yearly && daily {
        return Err(AurumError::MixedGranularity {
            asset: asset.to_string(),
        });
    }
    Ok(series)
}

/// Assembles a dollar-denominated record from loader output. `index` is
/// the asset's position in the source, used for the fallback color.
pub fn asset_from_quotes(
    index: usize,
    key: &str,
    name: Option<String>,
    color: Option<String>,
    quotes: Vec<(Period, Option<f64>)>,
) -> Result<AssetRecord, AurumError> {
    let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
    Ok(AssetRecord {
        key: key.to_string(),
        name: non_blank(name).unwrap_or_else(|| key.to_string()),
        color: non_blank(color).unwrap_or_else(|| default_color(index).to_string()),
        unit: Unit::Usd,
        prices: build_series(key, quotes)?,
    })
}
