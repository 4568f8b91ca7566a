//! JSON price file adapter.
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "sp500": { "name": "S&P 500", "prices": { "1971": "$102.09", "1972": null } },
//!   "btc":   { "prices": { "2013-04-01": "$93.03" } }
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::asset::{asset_from_quotes, parse_price, Period};
use crate::domain::dataset::Dataset;
use crate::domain::error::AurumError;
use crate::ports::data_port::DataPort;

#[derive(Debug, Deserialize)]
struct RawAsset {
    name: Option<String>,
    color: Option<String>,
    prices: BTreeMap<String, Option<RawPrice>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

pub struct JsonDataAdapter {
    path: PathBuf,
}

impl JsonDataAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses `content`; `source` only labels errors.
    pub fn parse_str(content: &str, source: &str) -> Result<Dataset, AurumError> {
        let malformed = |reason: String| AurumError::DataParse {
            path: source.to_string(),
            reason,
        };

        let root: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;

        let mut assets = Vec::with_capacity(root.len());
        for (index, (key, value)) in root.into_iter().enumerate() {
            let raw: RawAsset = serde_json::from_value(value)
                .map_err(|e| malformed(format!("asset {key}: {e}")))?;

            let mut quotes = Vec::with_capacity(raw.prices.len());
            for (period_str, price) in raw.prices {
                let period = Period::parse(&key, &period_str)?;
                let price = match price {
                    None => None,
                    Some(RawPrice::Text(s)) if s.trim().is_empty() => None,
                    Some(RawPrice::Text(s)) => Some(parse_price(&key, &period, &s)?),
                    Some(RawPrice::Number(n)) => Some(parse_price(&key, &period, &n.to_string())?),
                };
                quotes.push((period, price));
            }

            assets.push(asset_from_quotes(index, &key, raw.name, raw.color, quotes)?);
        }

        Ok(Dataset::new(assets))
    }
}

impl DataPort for JsonDataAdapter {
    fn load_assets(&self) -> Result<Dataset, AurumError> {
        let content = fs::read_to_string(&self.path).map_err(|e| AurumError::DataRead {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse_str(&content, &self.path.display().to_string())
    }
}
