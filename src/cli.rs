//! CLI definition and the load → fit → plot pipeline.

use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_data_adapter::JsonDataAdapter;
use crate::adapters::svg_file_adapter::SvgFileAdapter;
use crate::adapters::terminal_chart_adapter::TerminalChartAdapter;
use crate::domain::analysis::{analyze, Analysis, AnalysisOptions, AssetSummary, ViewSelection};
use crate::domain::asset::Granularity;
use crate::domain::config_validation::validate_config;
use crate::domain::dataset::DEFAULT_GOLD_KEY;
use crate::domain::error::AurumError;
use crate::domain::regression::GrowthFit;
use crate::domain::settings::{ChartSettings, OutputMode, RunSettings, DEFAULT_DATA_PATH};
use crate::domain::units::format_growth_rate;
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug, Default)]
#[command(
    name = "aurum",
    about = "Growth rates of stock indices, gold and Bitcoin, in dollars and in gold"
)]
pub struct Cli {
    /// Plot prices in US dollars
    #[arg(long)]
    pub dollars: bool,
    /// Plot prices in ounces of gold
    #[arg(long)]
    pub gold: bool,
    /// Save charts as SVG files instead of drawing them
    #[arg(long)]
    pub no_graph: bool,
    /// Price file (.json or .csv)
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    /// INI config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory for SVG output
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Ignore quotes before this year
    #[arg(long)]
    pub since: Option<i32>,
    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(code) => return code,
        },
        None => FileConfigAdapter::empty(),
    };

    if let Err(e) = validate_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    init_logging(&resolve_log_level(&cli, &config));

    let settings = match build_settings(&cli, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = data_port_for(&settings.data_path);
    let mut stdout = io::stdout();

    let result = match settings.output {
        OutputMode::Display => {
            let charts = TerminalChartAdapter::stdout(
                settings.chart.terminal_width,
                settings.chart.terminal_height,
            );
            run_pipeline(data_port.as_ref(), &charts, &settings, &mut stdout)
        }
        OutputMode::Files => {
            let charts = SvgFileAdapter::new(
                settings.output_dir.clone(),
                settings.chart.width,
                settings.chart.height,
            );
            run_pipeline(data_port.as_ref(), &charts, &settings, &mut stdout)
        }
    };

    match result {
        Ok(analysis) => {
            info!(charts = analysis.charts.len(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = AurumError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// `-v` wins, then `[logging] level`, then `info`. `RUST_LOG` overrides all.
pub fn resolve_log_level(cli: &Cli, config: &dyn ConfigPort) -> String {
    if cli.verbose {
        return "debug".to_string();
    }
    config
        .get_string("logging", "level")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // a subscriber may already be installed when run() is called repeatedly
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Merges CLI flags over config values over defaults. Expects a config
/// that already passed [`validate_config`].
pub fn build_settings(cli: &Cli, config: &dyn ConfigPort) -> Result<RunSettings, AurumError> {
    let defaults = ChartSettings::default();

    let since = match cli.since {
        Some(year) => Some(year),
        None => config
            .get_string("data", "since")
            .map(|s| {
                s.trim()
                    .parse::<i32>()
                    .map_err(|_| AurumError::ConfigInvalid {
                        section: "data".into(),
                        key: "since".into(),
                        reason: "must be a year, e.g. 1971".into(),
                    })
            })
            .transpose()?,
    };

    Ok(RunSettings {
        data_path: cli
            .data
            .clone()
            .or_else(|| config.get_string("data", "path").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
        gold_key: config
            .get_string("data", "gold_key")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_GOLD_KEY.to_string()),
        since,
        views: ViewSelection::from_flags(cli.dollars, cli.gold),
        output: if cli.no_graph {
            OutputMode::Files
        } else {
            OutputMode::Display
        },
        output_dir: cli
            .output_dir
            .clone()
            .or_else(|| config.get_string("output", "directory").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(".")),
        chart: ChartSettings {
            width: chart_size(config, "width", i64::from(defaults.width))?,
            height: chart_size(config, "height", i64::from(defaults.height))?,
            log_scale: config.get_bool("chart", "log_scale", defaults.log_scale),
            terminal_width: chart_size(config, "terminal_width", defaults.terminal_width as i64)?,
            terminal_height: chart_size(
                config,
                "terminal_height",
                defaults.terminal_height as i64,
            )?,
        },
    })
}

fn chart_size<T: TryFrom<i64>>(
    config: &dyn ConfigPort,
    key: &str,
    default: i64,
) -> Result<T, AurumError> {
    T::try_from(config.get_int("chart", key, default)).map_err(|_| AurumError::ConfigInvalid {
        section: "chart".into(),
        key: key.into(),
        reason: "out of range".into(),
    })
}

/// CSV for `.csv` files, JSON otherwise.
pub fn data_port_for(path: &Path) -> Box<dyn DataPort> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(CsvAdapter::new(path.to_path_buf()))
    } else {
        Box::new(JsonDataAdapter::new(path.to_path_buf()))
    }
}

/// Loads prices, prints growth rates to `out`, then hands every planned
/// chart to `charts`.
pub fn run_pipeline(
    data_port: &dyn DataPort,
    charts: &dyn ChartPort,
    settings: &RunSettings,
    out: &mut dyn Write,
) -> Result<Analysis, AurumError> {
    info!(path = %settings.data_path.display(), "loading price data");
    let dataset = data_port.load_assets()?;
    info!(assets = dataset.len(), "price data loaded");

    let dataset = match settings.since {
        Some(year) => {
            debug!(year, "restricting series");
            dataset.since(year)
        }
        None => dataset,
    };

    let analysis = analyze(
        &dataset,
        &AnalysisOptions {
            gold_key: settings.gold_key.clone(),
            views: settings.views,
            log_scale: settings.chart.log_scale,
        },
    )?;

    for skipped in &analysis.skipped {
        warn!(asset = %skipped.key, reason = %skipped.reason, "skipped");
    }

    write!(out, "{}", format_growth_table(&analysis.summaries))?;
    out.flush()?;

    for planned in &analysis.charts {
        debug!(chart = %planned.file_stem, lines = planned.chart.lines.len(), "presenting chart");
        charts.present(&planned.chart, &planned.file_stem)?;
    }

    Ok(analysis)
}

/// One row per asset: name, fitted range, growth in dollars and in gold.
pub fn format_growth_table(summaries: &[AssetSummary]) -> String {
    let name_width = summaries
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Asset".len());

    let rate = |fit: Option<&GrowthFit>| {
        fit.map(|f| format_growth_rate(f.growth_rate))
            .unwrap_or_else(|| "-".to_string())
    };

    let mut out = format!(
        "{:<nw$}  {:<24}  {:>12}  {:>12}\n",
        "Asset",
        "Range",
        "USD",
        "Gold",
        nw = name_width
    );
    for s in summaries {
        let range = match (&s.usd_fit, s.granularity) {
            (Some(f), Granularity::Yearly) => format!("{}-{}", f.start, f.end),
            (Some(f), Granularity::Daily) => format!("{} to {}", f.start, f.end),
            (None, _) => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<nw$}  {:<24}  {:>12}  {:>12}\n",
            s.name,
            range,
            rate(s.usd_fit.as_ref()),
            rate(s.gold_fit.as_ref()),
            nw = name_width
        ));
    }
    out
}
