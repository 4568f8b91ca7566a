//! Unit-aware number formatting for axis labels and console output.

use std::fmt;

/// What a price is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Usd,
    GoldOunce,
}

impl Unit {
    /// File-name suffix of a chart in this unit.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Usd => "usd",
            Unit::GoldOunce => "auoz",
        }
    }

    pub fn axis_title(&self) -> &'static str {
        match self {
            Unit::Usd => "Price (USD)",
            Unit::GoldOunce => "Price (oz of gold)",
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        match self {
            Unit::Usd => format_dollars(value),
            Unit::GoldOunce => format!("{} oz", format_significant(value, 3)),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Usd => write!(f, "USD"),
            Unit::GoldOunce => write!(f, "oz gold"),
        }
    }
}

const DOLLAR_SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "k")];

/// `$950`, `$12.5k`, `$3.20M`, `$1.05B`. The suffix follows the value
/// after rounding, so `999_999` prints as `$1.00M`.
pub fn format_dollars(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = round_significant(value.abs(), 3);

    for (scale, suffix) in DOLLAR_SUFFIXES {
        if abs >= scale {
            return format!("{sign}${}{suffix}", format_significant(abs / scale, 3));
        }
    }
    if abs >= 1.0 {
        format!("{sign}${}", format_significant(abs, 3))
    } else {
        format!("{sign}${abs:.2}")
    }
}

/// Rounds to `digits` significant digits without switching to exponent
/// notation. Values at or above `10^(digits-1)` print as integers.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let rounded = round_significant(value, digits);
    let decimals = (digits as i32 - 1 - magnitude(rounded)).max(0) as usize;
    format!("{rounded:.decimals$}")
}

fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let exp = digits as i32 - 1 - magnitude(value);
    if exp >= 0 {
        let factor = 10f64.powi(exp);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-exp);
        (value / factor).round() * factor
    }
}

fn magnitude(value: f64) -> i32 {
    value.abs().log10().floor() as i32
}

/// `+7.12%/yr`.
pub fn format_growth_rate(rate: f64) -> String {
    format!("{:+.2}%/yr", rate * 100.0)
}

/// Tick values for a log10 axis covering `[min, max]`: powers of ten, with
/// 2x and 5x subdivisions when fewer than three decades are visible.
pub fn log_ticks(min: f64, max: f64) -> Vec<f64> {
    if !(min > 0.0 && max > 0.0) || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let lo = min.log10().floor() as i32;
    let hi = max.log10().ceil() as i32;
    let multipliers: &[f64] = if hi - lo < 3 { &[1.0, 2.0, 5.0] } else { &[1.0] };

    let mut ticks = Vec::new();
    for exp in lo..=hi {
        let base = 10f64.powi(exp);
        for m in multipliers {
            let tick = base * m;
            if tick >= min * (1.0 - 1e-9) && tick <= max * (1.0 + 1e-9) {
                ticks.push(tick);
            }
        }
    }
    ticks
}

/// Evenly spaced tick values for a linear axis.
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count < 2 || !min.is_finite() || !max.is_finite() {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + step * i as f64).collect()
}
