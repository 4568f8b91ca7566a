//! Text-mode chart output for display mode.

use std::cell::RefCell;
use std::io::{self, Write};

use crate::domain::chart::{Chart, Scale};
use crate::domain::error::AurumError;
use crate::ports::chart_port::ChartPort;

const SERIES_MARK: char = '*';
const TREND_MARK: char = '.';

/// Draws charts as text onto a writer, stdout by default.
pub struct TerminalChartAdapter<W: Write> {
    out: RefCell<W>,
    width: usize,
    height: usize,
}

impl TerminalChartAdapter<io::Stdout> {
    pub fn stdout(width: usize, height: usize) -> Self {
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> TerminalChartAdapter<W> {
    /// `width` is the full line width in columns, `height` the number of
    /// plot rows.
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out: RefCell::new(out),
            width,
            height,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> ChartPort for TerminalChartAdapter<W> {
    fn present(&self, chart: &Chart, file_stem: &str) -> Result<(), AurumError> {
        let text = render_text(chart, self.width, self.height);
        let mut out = self.out.borrow_mut();
        if text.is_empty() {
            writeln!(out, "[{file_stem}] nothing to draw\n")?;
        } else {
            writeln!(out, "{text}")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Renders `chart` as lines of text, `width` columns wide with `height`
/// plot rows. Empty charts render as an empty string.
pub fn render_text(chart: &Chart, width: usize, height: usize) -> String {
    let Some(scale) = Scale::for_chart(chart) else {
        return String::new();
    };
    let rows = height.max(2);

    let label_rows = [0, rows / 2, rows - 1];
    let labels: Vec<String> = label_rows
        .iter()
        .map(|&r| {
            let fraction = 1.0 - r as f64 / (rows - 1) as f64;
            chart.unit.format_value(scale.y_value(fraction))
        })
        .collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 1;
    let cols = width.saturating_sub(label_width + 1).max(2);

    let mut grid = vec![vec![' '; cols]; rows];
    let to_cell = |x: f64, y: f64| -> (f64, f64) {
        let col = scale.x_fraction(x).clamp(0.0, 1.0) * (cols - 1) as f64;
        let row = (1.0 - scale.y_fraction(y).clamp(0.0, 1.0)) * (rows - 1) as f64;
        (col, row)
    };

    // trends first so the series stays visible where they overlap
    let ordered = chart
        .lines
        .iter()
        .filter(|l| l.dashed)
        .chain(chart.lines.iter().filter(|l| !l.dashed));
    for line in ordered {
        let mark = if line.dashed { TREND_MARK } else { SERIES_MARK };
        let cells: Vec<(f64, f64)> = line.points.iter().map(|&(x, y)| to_cell(x, y)).collect();
        if let [(c, r)] = cells.as_slice() {
            grid[r.round() as usize][c.round() as usize] = mark;
        }
        for pair in cells.windows(2) {
            let (c0, r0) = pair[0];
            let (c1, r1) = pair[1];
            let steps = (c1 - c0).abs().max((r1 - r0).abs()).ceil().max(1.0) as usize;
            for s in 0..=steps {
                let t = s as f64 / steps as f64;
                let c = (c0 + (c1 - c0) * t).round() as usize;
                let r = (r0 + (r1 - r0) * t).round() as usize;
                grid[r.min(rows - 1)][c.min(cols - 1)] = mark;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');

    for (r, row) in grid.iter().enumerate() {
        let label = label_rows
            .iter()
            .position(|&lr| lr == r)
            .map(|i| labels[i].as_str())
            .unwrap_or("");
        out.push_str(&format!("{label:>w$}|", w = label_width));
        out.extend(row.iter());
        out.push('\n');
    }

    out.push_str(&" ".repeat(label_width));
    out.push('+');
    out.push_str(&"-".repeat(cols));
    out.push('\n');

    let mut axis = vec![' '; cols];
    let mut next_free = 0usize;
    for tick in scale.x_ticks() {
        let len = tick.label.chars().count();
        let col = (scale.x_fraction(tick.x) * (cols - 1) as f64).round() as usize;
        let start = col.saturating_sub(len / 2);
        if start < next_free || start + len > cols {
            continue;
        }
        for (i, ch) in tick.label.chars().enumerate() {
            axis[start + i] = ch;
        }
        next_free = start + len + 1;
    }
    out.push_str(&" ".repeat(label_width + 1));
    out.extend(axis.iter());
    out.push('\n');

    for line in &chart.lines {
        let mark = if line.dashed { TREND_MARK } else { SERIES_MARK };
        out.push_str(&format!("  {mark} {}\n", line.label));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::{AssetRecord, Period};
    use crate::domain::chart::asset_chart;
    use crate::domain::regression::fit_growth;
    use crate::domain::units::Unit;

    fn gold() -> AssetRecord {
        AssetRecord {
            key: "gold".into(),
            name: "Gold".into(),
            color: "#d4af37".into(),
            unit: Unit::Usd,
            prices: (0..40)
                .map(|i| (Period::Year(1971 + i), 40.0 * 1.07f64.powi(i)))
                .collect(),
        }
    }

    #[test]
    fn fixed_dimensions() {
        let a = gold();
        let fit = fit_growth(&a.key, &a.prices).unwrap();
        let text = render_text(&asset_chart(&a, Some(&fit), true), 60, 12);
        let lines: Vec<&str> = text.lines().collect();

        // title + 12 rows + axis + year labels + 2 legend entries
        assert_eq!(lines.len(), 1 + 12 + 1 + 1 + 2);
        assert_eq!(lines[0], "Gold in USD");
        for row in &lines[1..=12] {
            assert_eq!(row.chars().count(), 60);
        }
    }

    #[test]
    fn rising_series_runs_bottom_left_to_top_right() {
        let text = render_text(&asset_chart(&gold(), None, true), 50, 10);
        let rows: Vec<&str> = text.lines().skip(1).take(10).collect();
        let plot = |r: &str| r.split_once('|').unwrap().1.to_string();

        assert!(plot(rows[9]).starts_with(SERIES_MARK));
        assert!(plot(rows[0]).ends_with(SERIES_MARK));
    }

    #[test]
    fn labels_use_unit_format() {
        let text = render_text(&asset_chart(&gold(), None, true), 50, 10);
        assert!(text.contains("$40.0"));
        assert!(text.contains("  * Gold"));
        assert!(text.contains("1980"));
    }

    #[test]
    fn daily_axis_shows_dates() {
        let btc = AssetRecord {
            key: "btc".into(),
            name: "Bitcoin".into(),
            color: "#f7931a".into(),
            unit: Unit::Usd,
            prices: [(4, 93.03), (6, 122.5), (9, 138.0)]
                .into_iter()
                .map(|(m, v)| {
                    let d = chrono::NaiveDate::from_ymd_opt(2013, m, 1).unwrap();
                    (Period::Date(d), v)
                })
                .collect(),
        };
        let text = render_text(&asset_chart(&btc, None, true), 72, 10);
        let axis_labels = text.lines().nth(1 + 10 + 1).unwrap();
        assert!(axis_labels.contains("2013-04"));
        assert!(axis_labels.contains("2013-06"));
    }

    #[test]
    fn present_writes_to_sink() {
        let adapter = TerminalChartAdapter::new(Vec::new(), 50, 8);
        adapter
            .present(&asset_chart(&gold(), None, true), "gold_usd")
            .unwrap();
        let out = String::from_utf8(adapter.into_inner()).unwrap();
        assert!(out.starts_with("Gold in USD\n"));
    }

    #[test]
    fn empty_chart_is_reported() {
        let mut a = gold();
        a.prices = Default::default();
        let adapter = TerminalChartAdapter::new(Vec::new(), 50, 8);
        adapter.present(&asset_chart(&a, None, true), "gold_usd").unwrap();
        let out = String::from_utf8(adapter.into_inner()).unwrap();
        assert!(out.contains("[gold_usd] nothing to draw"));
    }
}
