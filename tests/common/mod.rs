#![allow(dead_code)]

use aurum::domain::asset::{AssetRecord, Period};
use aurum::domain::chart::Chart;
use aurum::domain::dataset::Dataset;
use aurum::domain::error::AurumError;
use aurum::domain::units::Unit;
use aurum::ports::chart_port::ChartPort;
use aurum::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::cell::RefCell;

pub struct MockDataPort {
    pub dataset: Option<Dataset>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new(assets: Vec<AssetRecord>) -> Self {
        Self {
            dataset: Some(Dataset::new(assets)),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            dataset: None,
            error: Some(reason.to_string()),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_assets(&self) -> Result<Dataset, AurumError> {
        match (&self.dataset, &self.error) {
            (_, Some(reason)) => Err(AurumError::DataRead {
                path: "mock".into(),
                reason: reason.clone(),
            }),
            (Some(ds), None) => Ok(ds.clone()),
            (None, None) => Ok(Dataset::default()),
        }
    }
}

/// Records every chart it is handed.
#[derive(Default)]
pub struct RecordingChartPort {
    pub presented: RefCell<Vec<(String, Chart)>>,
}

impl RecordingChartPort {
    pub fn stems(&self) -> Vec<String> {
        self.presented
            .borrow()
            .iter()
            .map(|(stem, _)| stem.clone())
            .collect()
    }
}

impl ChartPort for RecordingChartPort {
    fn present(&self, chart: &Chart, file_stem: &str) -> Result<(), AurumError> {
        self.presented
            .borrow_mut()
            .push((file_stem.to_string(), chart.clone()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `base * (1 + rate)^i` for `n` consecutive years from `first`.
pub fn exponential_asset(key: &str, first: i32, n: i32, base: f64, rate: f64) -> AssetRecord {
    AssetRecord {
        key: key.to_string(),
        name: key.to_string(),
        color: "#333333".to_string(),
        unit: Unit::Usd,
        prices: (0..n)
            .map(|i| (Period::Year(first + i), base * (1.0 + rate).powi(i)))
            .collect(),
    }
}

pub fn daily_asset(key: &str, start: NaiveDate, days: i64, base: f64) -> AssetRecord {
    AssetRecord {
        key: key.to_string(),
        name: key.to_string(),
        color: "#f7931a".to_string(),
        unit: Unit::Usd,
        prices: (0..days)
            .map(|i| {
                (
                    Period::Date(start + chrono::Duration::days(i)),
                    base * 1.002f64.powi(i as i32),
                )
            })
            .collect(),
    }
}

pub const SAMPLE_JSON: &str = r##"{
    "sp500": {
        "name": "S&P 500",
        "color": "#1f77b4",
        "prices": {
            "1970": null,
            "1971": "$102.09",
            "1972": "$118.05",
            "1973": "$97.55",
            "1974": "$68.56",
            "1975": "$90.19"
        }
    },
    "us monetary base": {
        "prices": { "1971": "$74,000,000,000", "1972": "$80,000,000,000", "1975": "$105,000,000,000" }
    },
    "gold": {
        "name": "Gold",
        "color": "#d4af37",
        "prices": {
            "1971": "$40.62",
            "1972": "$58.42",
            "1973": "$97.39",
            "1974": "$154.00",
            "1975": "$160.86"
        }
    },
    "btc": {
        "name": "Bitcoin",
        "prices": {
            "2013-04-01": "$93.03",
            "2013-06-01": "$122.50",
            "2013-09-01": "$138.00",
            "2013-12-01": "$1,000.00"
        }
    }
}"##;
