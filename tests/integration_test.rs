//! Pipeline tests against mock ports.
//!
//! Tests cover:
//! - growth table and chart plan for a mixed yearly/daily dataset
//! - `since` restriction
//! - view selection
//! - load failures and a missing gold series

mod common;

use approx::assert_relative_eq;
use aurum::cli::{format_growth_table, run_pipeline};
use aurum::domain::analysis::ViewSelection;
use aurum::domain::chart::AxisKind;
use aurum::domain::error::AurumError;
use aurum::domain::settings::RunSettings;
use aurum::domain::units::Unit;
use common::*;

fn settings(dollars: bool, gold: bool) -> RunSettings {
    RunSettings {
        views: ViewSelection::from_flags(dollars, gold),
        ..Default::default()
    }
}

fn port() -> MockDataPort {
    MockDataPort::new(vec![
        exponential_asset("dow jones", 1950, 70, 200.0, 0.07),
        exponential_asset("m0", 1960, 60, 40e9, 0.065),
        daily_asset("btc", date(2015, 1, 1), 400, 300.0),
        exponential_asset("gold", 1950, 70, 35.0, 0.04),
    ])
}

mod full_pipeline {
    use super::*;

    #[test]
    fn plans_every_view_and_prints_rates() {
        let charts = RecordingChartPort::default();
        let mut out = Vec::new();

        let analysis = run_pipeline(&port(), &charts, &settings(false, false), &mut out).unwrap();

        assert_eq!(
            charts.stems(),
            vec![
                "dow_jones_usd",
                "dow_jones_auoz",
                "m0_usd",
                "m0_auoz",
                "gold_usd",
                "btc_usd"
            ]
        );
        assert_eq!(analysis.summaries.len(), 4);
        assert!(analysis.skipped.is_empty());

        let table = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Asset"));
        assert!(lines[1].starts_with("dow jones"));
        assert!(lines[1].contains("1950-2019"));
        assert!(lines[1].contains("+7.00%/yr"));
        assert!(lines[3].contains("2015-01-01 to 2016-02-04"));
    }

    #[test]
    fn gold_rates_are_relative() {
        let charts = RecordingChartPort::default();
        let analysis =
            run_pipeline(&port(), &charts, &settings(false, false), &mut Vec::new()).unwrap();

        let dow = &analysis.summaries[0];
        assert_relative_eq!(
            dow.gold_fit.as_ref().unwrap().growth_rate,
            1.07 / 1.04 - 1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn daily_chart_uses_date_axis() {
        let charts = RecordingChartPort::default();
        run_pipeline(&port(), &charts, &settings(true, false), &mut Vec::new()).unwrap();

        let presented = charts.presented.borrow();
        let (_, btc) = presented.iter().find(|(s, _)| s == "btc_usd").unwrap();
        assert_eq!(btc.x_axis, AxisKind::Dates);
        assert_eq!(btc.unit, Unit::Usd);
        assert_eq!(btc.lines.len(), 2);
    }

    #[test]
    fn normalized_charts_are_in_ounces() {
        let charts = RecordingChartPort::default();
        run_pipeline(&port(), &charts, &settings(false, true), &mut Vec::new()).unwrap();

        let presented = charts.presented.borrow();
        assert_eq!(presented.len(), 2);
        for (stem, chart) in presented.iter() {
            assert!(stem.ends_with("_auoz"));
            assert_eq!(chart.unit, Unit::GoldOunce);
        }
    }
}

mod restriction {
    use super::*;

    #[test]
    fn since_drops_earlier_years() {
        let charts = RecordingChartPort::default();
        let s = RunSettings {
            since: Some(2000),
            ..settings(true, false)
        };
        let analysis = run_pipeline(&port(), &charts, &s, &mut Vec::new()).unwrap();

        let dow = &analysis.summaries[0];
        assert_eq!(dow.points, 20);
        assert_eq!(dow.usd_fit.as_ref().unwrap().start.year(), 2000);
        // restriction does not change the rate of an exact exponential
        assert_relative_eq!(dow.usd_fit.as_ref().unwrap().growth_rate, 0.07, epsilon = 1e-9);
    }

    #[test]
    fn since_past_all_data_skips_assets() {
        let charts = RecordingChartPort::default();
        let s = RunSettings {
            since: Some(2100),
            ..settings(true, false)
        };
        let analysis = run_pipeline(&port(), &charts, &s, &mut Vec::new()).unwrap();

        assert!(analysis.summaries.is_empty());
        assert_eq!(analysis.skipped.len(), 4);
        assert!(charts.stems().is_empty());
    }
}

mod failures {
    use super::*;

    #[test]
    fn load_error_is_propagated() {
        let charts = RecordingChartPort::default();
        let err = run_pipeline(
            &MockDataPort::failing("disk on fire"),
            &charts,
            &settings(false, false),
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, AurumError::DataRead { reason, .. } if reason == "disk on fire"));
        assert!(charts.stems().is_empty());
    }

    #[test]
    fn gold_view_without_gold_fails() {
        let port = MockDataPort::new(vec![exponential_asset("dow", 1950, 10, 200.0, 0.07)]);
        let err = run_pipeline(
            &port,
            &RecordingChartPort::default(),
            &settings(false, true),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AurumError::MissingAsset { key } if key == "gold"));
    }

    #[test]
    fn empty_dataset_prints_header_only() {
        let mut out = Vec::new();
        run_pipeline(
            &MockDataPort::new(vec![]),
            &RecordingChartPort::default(),
            &settings(true, false),
            &mut out,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}

#[test]
fn growth_table_has_header_when_empty() {
    let table = format_growth_table(&[]);
    assert!(table.contains("USD"));
    assert!(table.contains("Gold"));
}
