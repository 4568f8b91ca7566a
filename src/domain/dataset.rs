//! The full set of assets loaded for one run.

use crate::domain::asset::AssetRecord;
use crate::domain::error::AurumError;

pub const DEFAULT_GOLD_KEY: &str = "gold";

/// Assets in input-file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub assets: Vec<AssetRecord>,
}

impl Dataset {
    pub fn new(assets: Vec<AssetRecord>) -> Self {
        Self { assets }
    }

    pub fn get(&self, key: &str) -> Option<&AssetRecord> {
        self.assets.iter().find(|a| a.key == key)
    }

    pub fn require(&self, key: &str) -> Result<&AssetRecord, AurumError> {
        self.get(key).ok_or_else(|| AurumError::MissingAsset {
            key: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Restricts every series to `year` onward. Assets left without quotes
    /// are kept so callers can report them.
    pub fn since(&self, year: i32) -> Self {
        Self {
            assets: self.assets.iter().map(|a| a.since(year)).collect(),
        }
    }
}
