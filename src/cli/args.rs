//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings so it can be tested
//! without touching the process environment.

use std::path::PathBuf;

use crate::comparison::ComparisonSort;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
    /// `-v` / `--verbose` seen anywhere on the line.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate the deterministic model once.
    Evaluate {
        /// Path to the analysis YAML file.
        config_path: PathBuf,
        /// Emit JSON instead of a report.
        json: bool,
    },
    /// Run the Monte Carlo engine.
    Simulate {
        /// Path to the analysis YAML file.
        config_path: PathBuf,
        /// Iteration override.
        iterations: Option<usize>,
        /// Seed override.
        seed: Option<u64>,
        /// Emit JSON instead of a report.
        json: bool,
    },
    /// Compare countries from raw indicators.
    Compare {
        /// Path to the indicators YAML file.
        indicators_path: PathBuf,
        /// Iterations per country.
        iterations: Option<usize>,
        /// Seed.
        seed: Option<u64>,
        /// Analysis year; the current year when absent.
        year: Option<u32>,
        /// Ranking key.
        sort: ComparisonSort,
        /// Emit JSON instead of a report.
        json: bool,
    },
    /// Print the reference analysis config.
    Defaults,
    /// List supported countries.
    Countries,
    /// Show help
    Help,
    /// Show version
    Version,
    /// The command line could not be parsed.
    Invalid {
        /// What was wrong.
        message: String,
    },
}

/// Options shared by the path-taking commands.
#[derive(Debug, Default)]
struct Options {
    iterations: Option<usize>,
    seed: Option<u64>,
    year: Option<u32>,
    sort: ComparisonSort,
    json: bool,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
        let args: Vec<&str> = args
            .iter()
            .map(String::as_str)
            .filter(|a| *a != "-v" && *a != "--verbose")
            .collect();

        let Some(&name) = args.get(1) else {
            return Self {
                command: Command::Help,
                verbose,
            };
        };

        let command = match name {
            "evaluate" => Self::parse_path_command(&args, |path, o| Command::Evaluate {
                config_path: path,
                json: o.json,
            }),
            "simulate" => Self::parse_path_command(&args, |path, o| Command::Simulate {
                config_path: path,
                iterations: o.iterations,
                seed: o.seed,
                json: o.json,
            }),
            "compare" => Self::parse_path_command(&args, |path, o| Command::Compare {
                indicators_path: path,
                iterations: o.iterations,
                seed: o.seed,
                year: o.year,
                sort: o.sort,
                json: o.json,
            }),
            "defaults" => Command::Defaults,
            "countries" => Command::Countries,
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => invalid(format!("unknown command '{unknown}'")),
        };

        Self { command, verbose }
    }

    /// Parse `<command> <path> [options]`.
    fn parse_path_command(args: &[&str], build: impl FnOnce(PathBuf, Options) -> Command) -> Command {
        let Some(path) = args.get(2).filter(|a| !a.starts_with("--")) else {
            return invalid(format!("'{}' requires a file path", args[1]));
        };

        match Self::parse_options(&args[3..]) {
            Ok(options) => build(PathBuf::from(path), options),
            Err(message) => invalid(message),
        }
    }

    fn parse_options(rest: &[&str]) -> Result<Options, String> {
        let mut options = Options::default();
        let mut it = rest.iter();
        while let Some(&flag) = it.next() {
            match flag {
                "--json" => options.json = true,
                "--iterations" | "-n" => {
                    let n: usize = value(flag, it.next())?;
                    if n == 0 {
                        return Err("--iterations must be at least 1".to_string());
                    }
                    options.iterations = Some(n);
                }
                "--seed" => options.seed = Some(value(flag, it.next())?),
                "--year" => options.year = Some(value(flag, it.next())?),
                "--sort" => options.sort = value(flag, it.next())?,
                other => return Err(format!("unknown option '{other}'")),
            }
        }
        Ok(options)
    }
}

fn value<T: std::str::FromStr>(flag: &str, raw: Option<&&str>) -> Result<T, String> {
    let raw = raw.ok_or_else(|| format!("{flag} requires a value"))?;
    raw.parse()
        .map_err(|_| format!("invalid value '{raw}' for {flag}"))
}

fn invalid(message: String) -> Command {
    Command::Invalid { message }
}
