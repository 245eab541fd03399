//! Command integration tests for service_cli
//!
//! Each test runs a command against a temporary output directory and reads
//! the produced files back.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use service_cli::commands::{
    correlated, factor, heston, panel, simulate, CorrelatedArgs, FactorArgs, FactorModelArgs,
    FeedArg, HestonArgs, HestonModelArgs, OutputFormat, PanelArgs, SimulateArgs,
};
use service_cli::{CliConfig, CliError};
use synth_core::types::ParameterViolation;

fn config_in(dir: &tempfile::TempDir) -> CliConfig {
    CliConfig {
        output_dir: dir.path().to_path_buf(),
        ..CliConfig::default()
    }
}

fn factor_model(duration: usize) -> FactorModelArgs {
    FactorModelArgs {
        duration,
        volatility: 0.2,
        assets: 2,
        betas: vec![],
        seed: 42,
    }
}

fn heston_model() -> HestonModelArgs {
    HestonModelArgs {
        initial_price: 100.0,
        initial_variance: 0.04,
        kappa: 2.0,
        theta: 0.04,
        sigma_v: 0.3,
        rho: -0.7,
        dt: 0.01,
        idiosyncratic: 0.1,
        exposures: vec![1.0],
    }
}

fn read_rows(path: &PathBuf) -> Vec<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_factor_then_heston_file_exchange() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    factor::run(
        &FactorArgs {
            model: factor_model(20),
            output: None,
        },
        &config,
    )
    .unwrap();

    let factor_rows = read_rows(&config.factor_path());
    assert_eq!(factor_rows.len(), 20);
    assert_eq!(factor_rows[0].len(), 4);

    heston::run(
        &HestonArgs {
            model: heston_model(),
            duration: 20,
            seed: Some(7),
            input: None,
            output: None,
        },
        &config,
    )
    .unwrap();

    let heston_rows = read_rows(&config.heston_path());
    assert_eq!(heston_rows.len(), 21);
    assert_eq!(heston_rows[0][0], "0");
    assert_relative_eq!(heston_rows[0][1].parse::<f64>().unwrap(), 100.0);
    assert_relative_eq!(heston_rows[0][2].parse::<f64>().unwrap(), 0.04);
    for row in &heston_rows {
        assert!(row[1].parse::<f64>().unwrap() >= 1e-8);
        assert!(row[2].parse::<f64>().unwrap() >= 1e-12);
    }
}

#[test]
fn test_file_exchange_matches_in_process_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    factor::run(
        &FactorArgs {
            model: factor_model(15),
            output: None,
        },
        &config,
    )
    .unwrap();
    heston::run(
        &HestonArgs {
            model: heston_model(),
            duration: 15,
            seed: Some(9),
            input: None,
            output: None,
        },
        &config,
    )
    .unwrap();

    let in_process = simulate::simulate(&SimulateArgs {
        factor: factor_model(15),
        heston: heston_model(),
        heston_seed: Some(9),
        feed: FeedArg::Levels,
        format: OutputFormat::Json,
        output: None,
    })
    .unwrap();

    let prices: Vec<f64> = read_rows(&config.heston_path())
        .iter()
        .map(|row| row[1].parse().unwrap())
        .collect();
    assert_eq!(prices, in_process.heston.prices);
}

#[test]
fn test_heston_rejects_short_factor_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    factor::run(
        &FactorArgs {
            model: factor_model(5),
            output: None,
        },
        &config,
    )
    .unwrap();

    let err = heston::run(
        &HestonArgs {
            model: heston_model(),
            duration: 10,
            seed: Some(1),
            input: None,
            output: None,
        },
        &config,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CliError::InsufficientData {
            expected: 10,
            found: 5
        }
    ));
}

#[test]
fn test_heston_rejects_malformed_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let input = dir.path().join("bad.csv");
    fs::write(&input, "time_step,asset_0,cumulative_factor_level\n0,0.1,0.2\n1,0.3\n").unwrap();

    let err = heston::run(
        &HestonArgs {
            model: heston_model(),
            duration: 2,
            seed: Some(1),
            input: Some(input),
            output: None,
        },
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, CliError::MalformedRow { row: 1, .. }));
    assert!(!config.heston_path().exists());
}

#[test]
fn test_heston_invalid_parameter_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let args = HestonArgs {
        model: HestonModelArgs {
            theta: -0.01,
            ..heston_model()
        },
        duration: 5,
        seed: Some(1),
        input: None,
        output: None,
    };

    match heston::run(&args, &config) {
        Err(CliError::Simulation(e)) => {
            assert_eq!(e.violation(), &ParameterViolation::NegativeLongTermVariance(-0.01));
        }
        other => panic!("expected simulation error, got {:?}", other),
    }
}

#[test]
fn test_simulate_json_payload() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let output = dir.path().join("out").join("result.json");

    simulate::run(
        &SimulateArgs {
            factor: factor_model(10),
            heston: heston_model(),
            heston_seed: Some(3),
            feed: FeedArg::Increments,
            format: OutputFormat::Json,
            output: Some(output.clone()),
        },
        &config,
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["factor_levels"].as_array().unwrap().len(), 10);
    assert_eq!(json["heston_prices"].as_array().unwrap().len(), 11);
    assert_eq!(json["heston_variances"].as_array().unwrap().len(), 11);
}

#[test]
fn test_simulate_csv_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = CliConfig {
        float_precision: Some(6),
        ..config_in(&dir)
    };

    simulate::run(
        &SimulateArgs {
            factor: factor_model(8),
            heston: heston_model(),
            heston_seed: Some(3),
            feed: FeedArg::Levels,
            format: OutputFormat::Csv,
            output: None,
        },
        &config,
    )
    .unwrap();

    assert_eq!(read_rows(&config.factor_path()).len(), 8);
    let heston_rows = read_rows(&config.heston_path());
    assert_eq!(heston_rows.len(), 9);
    assert_eq!(heston_rows[0][1], "100.000000");
}

#[test]
fn test_correlated_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    correlated::run(
        &CorrelatedArgs {
            duration: 12,
            vols: vec![0.01, 0.02],
            correlation: vec![1.0, 0.4, 0.4, 1.0],
            seed: 5,
            output: None,
        },
        &config,
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(dir.path().join("correlated_output.csv")).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec!["time_step", "increment_0", "increment_1", "level_0", "level_1"]
    );
    assert_eq!(rdr.records().count(), 12);
}

#[test]
fn test_correlated_rejects_bad_matrix() {
    let args = CorrelatedArgs {
        duration: 12,
        vols: vec![0.01, 0.02],
        correlation: vec![1.0, 0.4, 0.3, 1.0],
        seed: 5,
        output: None,
    };

    match correlated::simulate(&args) {
        Err(CliError::Simulation(e)) => assert_eq!(e.violation().code(), "correlation_not_symmetric"),
        other => panic!("expected simulation error, got {:?}", other),
    }
}

#[test]
fn test_correlated_rejects_wrong_entry_count() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let args = CorrelatedArgs {
        duration: 12,
        vols: vec![0.01, 0.02],
        correlation: vec![1.0, 0.4, 0.4],
        seed: 5,
        output: None,
    };

    match correlated::run(&args, &config) {
        Err(CliError::InvalidArgument(msg)) => {
            assert!(msg.contains("needs 4 entries"), "unexpected message: {}", msg);
        }
        other => panic!("expected invalid argument, got {:?}", other),
    }
    assert!(!dir.path().join("correlated_output.csv").exists());
}

fn panel_args(stocks: usize) -> PanelArgs {
    PanelArgs {
        duration: 30,
        vols: vec![0.01, 0.008, 0.006],
        correlation: vec![1.0, 0.3, -0.2, 0.3, 1.0, 0.1, -0.2, 0.1, 1.0],
        factor_seed: 42,
        stocks,
        loadings: vec![0.5],
        initial_price: 100.0,
        initial_variance: 0.04,
        kappa: 1.5,
        theta: 0.04,
        sigma_v: 0.3,
        rho: -0.7,
        dt: 0.01,
        idiosyncratic: 0.005,
        seed: Some(11),
        output: None,
    }
}

#[test]
fn test_panel_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    panel::run(&panel_args(4), &config).unwrap();

    let path = dir.path().join("panel_output.csv");
    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers.len(), 1 + 2 * 4);
    assert_eq!(headers[1], "price_0");
    assert_eq!(headers[5], "variance_0");

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 31);
    for row in &rows {
        for price in &row[1..5] {
            assert!(price.parse::<f64>().unwrap() >= 1e-8);
        }
        for variance in &row[5..] {
            assert!(variance.parse::<f64>().unwrap() >= 1e-12);
        }
    }
    assert_relative_eq!(rows[0][1].parse::<f64>().unwrap(), 100.0);
}

#[test]
fn test_panel_fixed_seeds_reproducible() {
    let a = panel::simulate(&panel_args(3)).unwrap();
    let b = panel::simulate(&panel_args(3)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_panel_rejects_wrong_loading_count() {
    let args = PanelArgs {
        loadings: vec![0.1, 0.2],
        ..panel_args(3)
    };
    assert!(matches!(
        panel::simulate(&args),
        Err(CliError::InvalidArgument(_))
    ));
}

#[test]
fn test_heston_rejects_non_finite_factor_cell() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let input = dir.path().join("nan.csv");
    fs::write(&input, "time_step,asset_0,cumulative_factor_level\n0,0.1,0.2\n1,0.3,NaN\n").unwrap();

    let err = heston::run(
        &HestonArgs {
            model: heston_model(),
            duration: 2,
            seed: Some(1),
            input: Some(input),
            output: None,
        },
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, CliError::MalformedRow { row: 1, .. }));
    assert!(!config.heston_path().exists());
}
