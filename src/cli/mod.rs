//! CLI module for sanicost.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{
    compare_command, current_year, defaults_command, evaluate_command, load_countries, run_cli,
    simulate_command,
};
pub use output::{
    format_usd, print_help, print_version, render_comparison, render_evaluation,
    render_simulation,
};

#[cfg(test)]
mod tests;
