//! CSV price file adapter.
//!
//! One quote per row: `asset,period,price`, with optional `name` and
//! `color` columns. Assets keep the order of their first row.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::domain::asset::{asset_from_quotes, parse_price, Period};
use crate::domain::dataset::Dataset;
use crate::domain::error::AurumError;
use crate::ports::data_port::DataPort;

#[derive(Debug, Deserialize)]
struct CsvRow {
    asset: String,
    period: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

struct PendingAsset {
    key: String,
    name: Option<String>,
    color: Option<String>,
    quotes: Vec<(Period, Option<f64>)>,
}

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse_str(content: &str, source: &str) -> Result<Dataset, AurumError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut pending: Vec<PendingAsset> = Vec::new();

        for result in rdr.deserialize::<CsvRow>() {
            let row = result.map_err(|e| AurumError::DataParse {
                path: source.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let period = Period::parse(&row.asset, &row.period)?;
            let price = match row.price.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(s) => Some(parse_price(&row.asset, &period, s)?),
            };

            let idx = match pending.iter().position(|p| p.key == row.asset) {
                Some(i) => i,
                None => {
                    pending.push(PendingAsset {
                        key: row.asset.clone(),
                        name: None,
                        color: None,
                        quotes: Vec::new(),
                    });
                    pending.len() - 1
                }
            };
            let entry = &mut pending[idx];
            if entry.name.is_none() {
                entry.name = row.name.filter(|n| !n.is_empty());
            }
            if entry.color.is_none() {
                entry.color = row.color.filter(|c| !c.is_empty());
            }
            entry.quotes.push((period, price));
        }

        let assets = pending
            .into_iter()
            .enumerate()
            .map(|(index, p)| asset_from_quotes(index, &p.key, p.name, p.color, p.quotes))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Dataset::new(assets))
    }
}

impl DataPort for CsvAdapter {
    fn load_assets(&self) -> Result<Dataset, AurumError> {
        let content = fs::read_to_string(&self.path).map_err(|e| AurumError::DataRead {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse_str(&content, &self.path.display().to_string())
    }
}
