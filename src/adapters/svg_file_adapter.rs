//! Writes each chart to `<output_dir>/<file_stem>.svg`.

use std::fs;
use std::path::PathBuf;

use crate::adapters::chart_svg::render_svg;
use crate::domain::chart::Chart;
use crate::domain::error::AurumError;
use crate::ports::chart_port::ChartPort;

pub struct SvgFileAdapter {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl SvgFileAdapter {
    pub fn new(output_dir: PathBuf, width: u32, height: u32) -> Self {
        Self {
            output_dir,
            width,
            height,
        }
    }

    pub fn path_for(&self, file_stem: &str) -> PathBuf {
        self.output_dir.join(format!("{file_stem}.svg"))
    }
}

impl ChartPort for SvgFileAdapter {
    fn present(&self, chart: &Chart, file_stem: &str) -> Result<(), AurumError> {
        let svg = render_svg(chart, self.width, self.height);
        if svg.is_empty() {
            tracing::warn!(chart = file_stem, "nothing to draw, no file written");
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(file_stem);
        fs::write(&path, svg)?;
        tracing::info!(path = %path.display(), "chart written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::{AssetRecord, Period};
    use crate::domain::chart::{asset_chart, chart_file_stem};
    use crate::domain::units::Unit;
    use tempfile::TempDir;

    fn chart(points: usize) -> Chart {
        let asset = AssetRecord {
            key: "gold".into(),
            name: "Gold".into(),
            color: "#d4af37".into(),
            unit: Unit::Usd,
            prices: (0..points as i32)
                .map(|i| (Period::Year(1971 + i), 40.0 + i as f64))
                .collect(),
        };
        asset_chart(&asset, None, true)
    }

    #[test]
    fn writes_svg_named_after_stem() {
        let dir = TempDir::new().unwrap();
        let adapter = SvgFileAdapter::new(dir.path().join("charts"), 640, 360);

        adapter.present(&chart(5), "gold_usd").unwrap();

        let written = fs::read_to_string(dir.path().join("charts/gold_usd.svg")).unwrap();
        assert!(written.starts_with("<svg width=\"640\" height=\"360\""));
    }

    #[test]
    fn file_name_replaces_spaces_in_key() {
        let dir = TempDir::new().unwrap();
        let adapter = SvgFileAdapter::new(dir.path().to_path_buf(), 640, 360);

        let stem = chart_file_stem("us monetary base", Unit::GoldOunce);
        adapter.present(&chart(3), &stem).unwrap();

        assert!(dir.path().join("us_monetary_base_auoz.svg").exists());
    }

    #[test]
    fn skips_empty_chart() {
        let dir = TempDir::new().unwrap();
        let adapter = SvgFileAdapter::new(dir.path().to_path_buf(), 640, 360);

        adapter.present(&chart(0), "gold_usd").unwrap();
        assert!(!adapter.path_for("gold_usd").exists());
    }
}
