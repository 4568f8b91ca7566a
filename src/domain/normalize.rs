//! Re-denominating assets in ounces of gold.

use crate::domain::asset::{AssetRecord, PriceSeries};
use crate::domain::units::Unit;

/// Divides `asset` by `gold` for every period quoted in both.
///
/// Periods missing from either series are dropped, so a daily asset
/// normalized against a yearly gold series comes back empty.
pub fn normalize_to_gold(asset: &AssetRecord, gold: &AssetRecord) -> AssetRecord {
    let prices: PriceSeries = asset
        .prices
        .iter()
        .filter_map(|(period, price)| gold.prices.get(&period).map(|g| (period, price / g)))
        .collect();

    AssetRecord {
        key: asset.key.clone(),
        name: asset.name.clone(),
        color: asset.color.clone(),
        unit: Unit::GoldOunce,
        prices,
    }
}
