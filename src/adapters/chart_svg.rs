//! SVG line chart rendering.

use crate::domain::chart::{AxisKind, Chart, Scale};

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 48.0;
const LEGEND_LINE_HEIGHT: f64 = 16.0;

/// Renders `chart` as a standalone SVG document. An empty chart yields an
/// empty string.
pub fn render_svg(chart: &Chart, width: u32, height: u32) -> String {
    let Some(scale) = Scale::for_chart(chart) else {
        return String::new();
    };

    let width = width as f64;
    let height = height as f64;
    let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

    let x_pos = |x: f64| MARGIN_LEFT + scale.x_fraction(x) * plot_width;
    let y_pos = |y: f64| MARGIN_TOP + plot_height - scale.y_fraction(y) * plot_height;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" font-family="sans-serif">"##,
        w = width,
        h = height
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\" fill=\"#222\">{}</text>\n",
        width / 2.0,
        escape(&chart.title)
    ));

    for tick in scale.y_ticks() {
        let y = y_pos(tick);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#eee\" stroke-width=\"1\"/>\n",
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + plot_width,
            y
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
            MARGIN_LEFT - 6.0,
            y + 3.0,
            escape(&chart.unit.format_value(tick))
        ));
    }

    for tick in scale.x_ticks() {
        let x = x_pos(tick.x);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#eee\" stroke-width=\"1\"/>\n",
            x,
            MARGIN_TOP,
            x,
            MARGIN_TOP + plot_height
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
            x,
            MARGIN_TOP + plot_height + 14.0,
            escape(&tick.label)
        ));
    }

    // axes
    svg.push_str(&format!(
        "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#999\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        MARGIN_TOP + plot_height
    ));
    svg.push_str(&format!(
        "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#999\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP + plot_height,
        MARGIN_LEFT + plot_width,
        MARGIN_TOP + plot_height
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#444\">{}</text>\n",
        MARGIN_LEFT + plot_width / 2.0,
        height - 8.0,
        match chart.x_axis {
            AxisKind::Years => "Year",
            AxisKind::Dates => "Date",
        }
    ));
    svg.push_str(&format!(
        "  <text x=\"14\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#444\" transform=\"rotate(-90 14 {:.1})\">{}{}</text>\n",
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0,
        chart.unit.axis_title(),
        if scale.log_scale { ", log scale" } else { "" }
    ));

    for line in &chart.lines {
        if line.points.is_empty() {
            continue;
        }
        let path_data = line
            .points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let cmd = if i == 0 { "M" } else { "L" };
                format!("{} {:.1} {:.1}", cmd, x_pos(x), y_pos(y))
            })
            .collect::<Vec<_>>()
            .join(" ");
        let dash = if line.dashed {
            " stroke-dasharray=\"6 4\""
        } else {
            ""
        };
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>\n",
            path_data,
            escape(&line.color),
            if line.dashed { 1.5 } else { 2.0 },
            dash
        ));
    }

    for (i, line) in chart.lines.iter().enumerate() {
        let y = MARGIN_TOP + 12.0 + i as f64 * LEGEND_LINE_HEIGHT;
        let dash = if line.dashed {
            " stroke-dasharray=\"6 4\""
        } else {
            ""
        };
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\"{}/>\n",
            MARGIN_LEFT + 10.0,
            y - 4.0,
            MARGIN_LEFT + 34.0,
            y - 4.0,
            escape(&line.color),
            dash
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#222\">{}</text>\n",
            MARGIN_LEFT + 40.0,
            y,
            escape(&line.label)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
