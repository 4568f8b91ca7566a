//! Per-run analysis: growth fits for every asset and the list of charts to
//! produce.

use std::fmt;

use crate::domain::asset::{AssetRecord, Granularity};
use crate::domain::chart::{asset_chart, chart_file_stem, Chart};
use crate::domain::dataset::Dataset;
use crate::domain::error::AurumError;
use crate::domain::normalize::normalize_to_gold;
use crate::domain::regression::{fit_growth, GrowthFit};

/// Which views to chart. Growth rates are always computed for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSelection {
    pub dollars: bool,
    pub gold: bool,
}

impl ViewSelection {
    /// No flag at all selects both views.
    pub fn from_flags(dollars: bool, gold: bool) -> Self {
        if !dollars && !gold {
            Self {
                dollars: true,
                gold: true,
            }
        } else {
            Self { dollars, gold }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub gold_key: String,
    pub views: ViewSelection,
    pub log_scale: bool,
}

#[derive(Debug, Clone)]
pub struct AssetSummary {
    pub key: String,
    pub name: String,
    pub granularity: Granularity,
    pub points: usize,
    pub usd_fit: Option<GrowthFit>,
    pub gold_fit: Option<GrowthFit>,
}

#[derive(Debug, Clone)]
pub struct SkippedAsset {
    pub key: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    NoGoldOverlap,
    InsufficientData { points: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no quotes in range"),
            SkipReason::NoGoldOverlap => write!(f, "no years in common with gold"),
            SkipReason::InsufficientData { points } => {
                write!(f, "only {points} point(s), cannot fit a trend")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlannedChart {
    pub file_stem: String,
    pub chart: Chart,
}

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub summaries: Vec<AssetSummary>,
    pub charts: Vec<PlannedChart>,
    pub skipped: Vec<SkippedAsset>,
}

/// Fits every asset in dollars and, when gold is present, in ounces of
/// gold. Yearly assets are charted first, daily assets after them on their
/// own date axis.
///
/// Fails only when the gold view is requested and gold is absent.
pub fn analyze(dataset: &Dataset, options: &AnalysisOptions) -> Result<Analysis, AurumError> {
    let gold = if options.views.gold {
        Some(dataset.require(&options.gold_key)?)
    } else {
        dataset.get(&options.gold_key)
    };

    let mut analysis = Analysis::default();
    let mut daily_charts = Vec::new();

    for asset in &dataset.assets {
        let Some(granularity) = asset.granularity() else {
            analysis.skipped.push(SkippedAsset {
                key: asset.key.clone(),
                reason: SkipReason::NoData,
            });
            continue;
        };

        let usd_fit = try_fit(asset, &mut analysis.skipped);

        let mut gold_fit = None;
        if granularity == Granularity::Yearly {
            if options.views.dollars {
                analysis.charts.push(plan(asset, usd_fit.as_ref(), options));
            }
            if let Some(gold) = gold.filter(|g| g.key != asset.key) {
                let normalized = normalize_to_gold(asset, gold);
                if normalized.prices.is_empty() {
                    analysis.skipped.push(SkippedAsset {
                        key: asset.key.clone(),
                        reason: SkipReason::NoGoldOverlap,
                    });
                } else {
                    gold_fit = try_fit(&normalized, &mut analysis.skipped);
                    if options.views.gold {
                        analysis
                            .charts
                            .push(plan(&normalized, gold_fit.as_ref(), options));
                    }
                }
            }
        } else if options.views.dollars {
            daily_charts.push(plan(asset, usd_fit.as_ref(), options));
        }

        analysis.summaries.push(AssetSummary {
            key: asset.key.clone(),
            name: asset.name.clone(),
            granularity,
            points: asset.prices.len(),
            usd_fit,
            gold_fit,
        });
    }

    analysis.charts.extend(daily_charts);
    Ok(analysis)
}

fn try_fit(asset: &AssetRecord, skipped: &mut Vec<SkippedAsset>) -> Option<GrowthFit> {
    match fit_growth(&asset.key, &asset.prices) {
        Ok(fit) => Some(fit),
        Err(_) => {
            skipped.push(SkippedAsset {
                key: asset.key.clone(),
                reason: SkipReason::InsufficientData {
                    points: asset.prices.len(),
                },
            });
            None
        }
    }
}

fn plan(asset: &AssetRecord, fit: Option<&GrowthFit>, options: &AnalysisOptions) -> PlannedChart {
    PlannedChart {
        file_stem: chart_file_stem(&asset.key, asset.unit),
        chart: asset_chart(asset, fit, options.log_scale),
    }
}
