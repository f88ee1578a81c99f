//! CLI command handlers.
//!
//! Each handler returns a `ModelResult`; `run_cli` turns the first error
//! into a message on stderr and exit code 1.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use chrono::{Datelike, Local};
use tracing::debug;

use crate::comparison::{
    compare, sort_comparisons, ComparisonSort, CountryInput, DEFAULT_COMPARISON_ITERATIONS,
};
use crate::config::{AnalysisConfig, MAX_ITERATIONS};
use crate::engine::rng::SimRng;
use crate::error::{ModelError, ModelResult};
use crate::model::{evaluate, ModelInputs};
use crate::scenarios::{country, estimate_inputs, RawIndicators};

use super::output::{
    print_banner, print_comparison, print_countries, print_evaluation, print_help,
    print_simulation, print_version,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let result = match args.command {
        Command::Evaluate { config_path, json } => evaluate_command(&config_path, json),
        Command::Simulate {
            config_path,
            iterations,
            seed,
            json,
        } => simulate_command(&config_path, iterations, seed, json),
        Command::Compare {
            indicators_path,
            iterations,
            seed,
            year,
            sort,
            json,
        } => compare_command(&indicators_path, iterations, seed, year, sort, json),
        Command::Defaults => defaults_command(),
        Command::Countries => {
            print_countries();
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
        Command::Invalid { message } => {
            eprintln!("Error: {message}\n");
            print_help();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Evaluate the deterministic model on a config's inputs.
///
/// # Errors
///
/// Config load/validation errors and evaluation errors.
pub fn evaluate_command(path: &Path, json: bool) -> ModelResult<()> {
    let config = AnalysisConfig::load(path)?;
    let outputs = evaluate(&config.inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        print_banner("sanicost - Cost Evaluation");
        print_evaluation(&config.inputs, &outputs);
    }
    Ok(())
}

/// Run a Monte Carlo simulation on a config's inputs.
///
/// # Errors
///
/// Config load/validation errors and simulation errors.
pub fn simulate_command(
    path: &Path,
    iterations: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> ModelResult<()> {
    let mut config = AnalysisConfig::load(path)?;
    config.apply_overrides(iterations, seed)?;

    let mut rng = config.rng();
    let seed = rng.master_seed();
    debug!(seed, iterations = config.monte_carlo.iterations, "Starting simulation");

    let stats = if json {
        config.engine().run(&config.inputs, &mut rng, None)?
    } else {
        print_banner("sanicost - Monte Carlo Uncertainty");
        let report = |p: u8| eprint!("\r  progress: {p:>3}%");
        let stats = config.engine().run(&config.inputs, &mut rng, Some(&report))?;
        eprintln!();
        stats
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_simulation(&stats, seed);
    }
    Ok(())
}

/// Load an indicators file: ISO code → raw indicators.
///
/// # Errors
///
/// I/O, YAML, or an unsupported country code.
pub fn load_countries(path: &Path, analysis_year: u32) -> ModelResult<Vec<CountryInput>> {
    let content = std::fs::read_to_string(path)?;
    let raw: BTreeMap<String, RawIndicators> = serde_yaml::from_str(&content)?;
    if raw.is_empty() {
        return Err(ModelError::config("indicators file lists no countries"));
    }

    raw.iter()
        .map(|(code, indicators)| -> ModelResult<CountryInput> {
            let c = country(code)?;
            Ok(CountryInput {
                code: c.code.to_string(),
                name: c.name.to_string(),
                inputs: estimate_inputs(indicators, c.currency, analysis_year).inputs,
            })
        })
        .collect()
}

/// Current calendar year, local time.
#[must_use]
pub fn current_year() -> u32 {
    u32::try_from(Local::now().year())
        .unwrap_or_else(|_| ModelInputs::default().macro_.analysis_year)
}

/// Compare countries.
///
/// # Errors
///
/// Indicator loading errors and simulation errors.
pub fn compare_command(
    path: &Path,
    iterations: Option<usize>,
    seed: Option<u64>,
    year: Option<u32>,
    sort: ComparisonSort,
    json: bool,
) -> ModelResult<()> {
    let year = year.unwrap_or_else(current_year);
    debug!(year, "Estimating inputs");
    let countries = load_countries(path, year)?;
    let iterations = iterations.unwrap_or(DEFAULT_COMPARISON_ITERATIONS);
    if iterations > MAX_ITERATIONS {
        return Err(ModelError::config(format!(
            "iterations must be at most {MAX_ITERATIONS}"
        )));
    }
    let mut rng = seed.map_or_else(SimRng::from_entropy, SimRng::new);

    let mut results = if json {
        compare(&countries, iterations, &mut rng, None)?
    } else {
        print_banner("sanicost - Country Comparison");
        let report = |p: u8| eprint!("\r  progress: {p:>3}%");
        let results = compare(&countries, iterations, &mut rng, Some(&report))?;
        eprintln!();
        results
    };
    sort_comparisons(&mut results, sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_comparison(&results, sort);
    }
    Ok(())
}

/// Print the reference analysis config as YAML.
///
/// # Errors
///
/// YAML serialization errors.
pub fn defaults_command() -> ModelResult<()> {
    let config = AnalysisConfig::builder()
        .name("Reference baseline")
        .seed(42)
        .build();
    print!("{}", config.to_yaml()?);
    Ok(())
}
