//! CLI module tests.

use super::args::{Args, Command};
use super::commands::{
    compare_command, current_year, defaults_command, evaluate_command, load_countries, run_cli,
    simulate_command,
};
use super::output::{
    format_usd, print_help, print_version, render_comparison, render_evaluation,
    render_simulation,
};
use crate::comparison::{compare, ComparisonSort};
use crate::config::AnalysisConfig;
use crate::engine::rng::SimRng;
use crate::error::ModelError;
use crate::model::{evaluate, ModelInputs};
use crate::simulation::simulate;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn analysis_file(iterations: usize) -> tempfile::NamedTempFile {
    let config = AnalysisConfig::builder().seed(42).iterations(iterations).build();
    write_temp(&config.to_yaml().unwrap())
}

const INDICATORS: &str = r"
MW:
  population: 20000000
  gdpPerCapita: 600
  exchangeRate: 1700
ne:
  population: 26000000
  gdpPerCapita: 590
  openDefecation: 65
";

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["sanicost"]);
    assert_eq!(args.command, Command::Help);
    assert!(!args.verbose);
}

#[test]
fn test_parse_help_and_version() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["sanicost", flag]).command, Command::Help);
    }
    for flag in ["-V", "--version", "version"] {
        assert_eq!(Args::parse_from(["sanicost", flag]).command, Command::Version);
    }
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["sanicost", "unknown-cmd"]);
    assert!(matches!(args.command, Command::Invalid { ref message } if message.contains("unknown-cmd")));
}

#[test]
fn test_parse_evaluate() {
    let args = Args::parse_from(["sanicost", "evaluate", "a.yaml", "--json"]);
    assert_eq!(
        args.command,
        Command::Evaluate {
            config_path: PathBuf::from("a.yaml"),
            json: true,
        }
    );
}

#[test]
fn test_parse_simulate_with_options() {
    let args = Args::parse_from([
        "sanicost",
        "simulate",
        "a.yaml",
        "--iterations",
        "10000",
        "--seed",
        "7",
    ]);
    assert_eq!(
        args.command,
        Command::Simulate {
            config_path: PathBuf::from("a.yaml"),
            iterations: Some(10_000),
            seed: Some(7),
            json: false,
        }
    );
}

#[test]
fn test_parse_simulate_short_iterations() {
    let args = Args::parse_from(["sanicost", "simulate", "a.yaml", "-n", "500"]);
    assert!(matches!(args.command, Command::Simulate { iterations: Some(500), .. }));
}

#[test]
fn test_parse_missing_path() {
    let args = Args::parse_from(["sanicost", "simulate"]);
    assert!(matches!(args.command, Command::Invalid { .. }));
    let args = Args::parse_from(["sanicost", "evaluate", "--json"]);
    assert!(matches!(args.command, Command::Invalid { .. }));
}

#[test]
fn test_parse_bad_option_values() {
    for argv in [
        vec!["sanicost", "simulate", "a.yaml", "--iterations", "many"],
        vec!["sanicost", "simulate", "a.yaml", "--iterations", "0"],
        vec!["sanicost", "simulate", "a.yaml", "--seed"],
        vec!["sanicost", "compare", "i.yaml", "--sort", "median"],
        vec!["sanicost", "compare", "i.yaml", "--year", "-5"],
        vec!["sanicost", "evaluate", "a.yaml", "--frobnicate"],
    ] {
        let args = Args::parse_from(&argv);
        assert!(matches!(args.command, Command::Invalid { .. }), "{argv:?}");
    }
}

#[test]
fn test_parse_compare_sort() {
    let args = Args::parse_from(["sanicost", "compare", "i.yaml", "--sort", "total"]);
    assert!(matches!(
        args.command,
        Command::Compare {
            sort: ComparisonSort::TotalCost,
            ..
        }
    ));
    let args = Args::parse_from(["sanicost", "compare", "i.yaml"]);
    assert!(matches!(
        args.command,
        Command::Compare {
            sort: ComparisonSort::PercentGdp,
            iterations: None,
            ..
        }
    ));
}

#[test]
fn test_parse_compare_year() {
    let args = Args::parse_from(["sanicost", "compare", "i.yaml", "--year", "2021"]);
    assert!(matches!(args.command, Command::Compare { year: Some(2021), .. }));
    let args = Args::parse_from(["sanicost", "compare", "i.yaml"]);
    assert!(matches!(args.command, Command::Compare { year: None, .. }));
}

#[test]
fn test_parse_verbose_anywhere() {
    let args = Args::parse_from(["sanicost", "-v", "evaluate", "a.yaml"]);
    assert!(args.verbose);
    assert!(matches!(args.command, Command::Evaluate { .. }));

    let args = Args::parse_from(["sanicost", "countries", "--verbose"]);
    assert!(args.verbose);
    assert_eq!(args.command, Command::Countries);
}

#[test]
fn test_parse_simple_commands() {
    assert_eq!(Args::parse_from(["sanicost", "defaults"]).command, Command::Defaults);
    assert_eq!(Args::parse_from(["sanicost", "countries"]).command, Command::Countries);
}

// ============================================================================
// Output formatting tests
// ============================================================================

#[test]
fn test_print_version() {
    // Just verify it doesn't panic
    print_version();
}

#[test]
fn test_print_help() {
    // Just verify it doesn't panic
    print_help();
}

#[test]
fn test_format_usd() {
    assert_eq!(format_usd(286_329_280.76), "$286.33M");
    assert_eq!(format_usd(1_200_000_000.0), "$1.20B");
    assert_eq!(format_usd(12_500.0), "$12.5K");
    assert_eq!(format_usd(950.0), "$950");
    assert_eq!(format_usd(-2_000_000.0), "-$2.00M");
}

#[test]
fn test_render_evaluation() {
    let inputs = ModelInputs::default();
    let outputs = evaluate(&inputs).unwrap();
    let text = render_evaluation(&inputs, &outputs);
    assert!(text.contains("$286.33M"));
    assert!(text.contains("humanCapital"));
    assert!(text.contains("2.39%"));
    assert!(text.contains("Health care"));
}

#[test]
fn test_render_simulation() {
    let stats = simulate(&ModelInputs::default(), 300, &mut SimRng::new(1), None).unwrap();
    let text = render_simulation(&stats, 1);
    assert!(text.contains("Iterations: 300"));
    assert!(text.contains("Seed: 1"));
    assert!(text.contains("Distribution of total cost"));
    assert!(text.contains('█'));
}

#[test]
fn test_render_comparison() {
    let countries = load_countries(write_temp(INDICATORS).path(), 2023).unwrap();
    let results = compare(&countries, 50, &mut SimRng::new(1), None).unwrap();
    let text = render_comparison(&results, ComparisonSort::TotalCost);
    assert!(text.contains("ranked by total USD"));
    assert!(text.contains("Malawi (MW)"));
    assert!(text.contains("Niger (NE)"));
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_evaluate_command() {
    let file = analysis_file(100);
    assert!(evaluate_command(file.path(), false).is_ok());
    assert!(evaluate_command(file.path(), true).is_ok());
}

#[test]
fn test_evaluate_missing_file() {
    let err = evaluate_command(&PathBuf::from("/nonexistent/analysis.yaml"), false).unwrap_err();
    assert!(matches!(err, ModelError::Io(_)));
}

#[test]
fn test_evaluate_invalid_yaml() {
    let file = write_temp("inputs: [not, a, map]\n");
    let err = evaluate_command(file.path(), false).unwrap_err();
    assert!(matches!(err, ModelError::YamlParse(_)));
}

#[test]
fn test_simulate_command() {
    let file = analysis_file(200);
    assert!(simulate_command(file.path(), None, None, true).is_ok());
    assert!(simulate_command(file.path(), Some(50), Some(3), false).is_ok());
}

#[test]
fn test_load_countries() {
    let file = write_temp(INDICATORS);
    let countries = load_countries(file.path(), 2023).unwrap();
    assert_eq!(countries.len(), 2);
    // BTreeMap order: "MW" sorts before "ne"
    assert_eq!(countries[0].code, "MW");
    assert_eq!(countries[0].inputs.macro_.currency_code, "MWK");
    assert_eq!(countries[1].code, "NE");
    assert_eq!(countries[1].inputs.macro_.currency_code, "XOF");
    assert!((countries[1].inputs.access.open_defecation_prevalence - 0.65).abs() < 1e-12);
}

#[test]
fn test_load_countries_uses_requested_year() {
    let countries = load_countries(write_temp(INDICATORS).path(), 2021).unwrap();
    assert!(countries.iter().all(|c| c.inputs.macro_.analysis_year == 2021));
}

#[test]
fn test_current_year_is_recent() {
    assert!(current_year() >= 2024);
}

#[test]
fn test_negative_indicators_do_not_abort_comparison() {
    let file = write_temp("MW:\n  population: -3\n  gdpPerCapita: -500\nNE:\n  population: 26000000\n");
    let countries = load_countries(file.path(), 2023).unwrap();
    assert!(countries.iter().all(|c| c.inputs.check().is_ok()));
    let results = compare(&countries, 20, &mut SimRng::new(2), None).unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn test_load_countries_unknown_code() {
    let file = write_temp("FR:\n  population: 68000000\n");
    let err = load_countries(file.path(), 2023).unwrap_err();
    assert!(matches!(err, ModelError::UnknownCountry(ref c) if c == "FR"));
}

#[test]
fn test_load_countries_empty() {
    let file = write_temp("{}\n");
    assert!(load_countries(file.path(), 2023).is_err());
}

#[test]
fn test_compare_command() {
    let file = write_temp(INDICATORS);
    assert!(
        compare_command(file.path(), Some(30), Some(1), None, ComparisonSort::PercentGdp, true)
            .is_ok()
    );
    assert!(compare_command(
        file.path(),
        Some(30),
        Some(1),
        Some(2021),
        ComparisonSort::TotalCost,
        false
    )
    .is_ok());
}

#[test]
fn test_defaults_command() {
    assert!(defaults_command().is_ok());
}

#[test]
fn test_run_cli_exit_codes() {
    assert_eq!(run_cli(Args::parse_from(["sanicost", "help"])), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(["sanicost", "countries"])), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(["sanicost", "bogus"])), ExitCode::from(1));
    assert_eq!(
        run_cli(Args::parse_from(["sanicost", "evaluate", "/nonexistent.yaml"])),
        ExitCode::from(1)
    );
}

#[test]
fn test_run_cli_evaluate_file() {
    let file = analysis_file(100);
    let path = file.path().to_string_lossy().to_string();
    assert_eq!(
        run_cli(Args::parse_from(["sanicost", "evaluate", path.as_str()])),
        ExitCode::SUCCESS
    );
}
