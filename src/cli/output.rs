//! CLI output formatting.
//!
//! Report rendering is split into `render_*` functions returning strings,
//! so tests can assert on the text; `print_*` write it to stdout.

use std::fmt::Write as _;

use crate::comparison::{ComparisonSort, CountryComparison};
use crate::model::{CostCategory, ModelInputs, ModelOutputs};
use crate::scenarios::SUPPORTED_COUNTRIES;
use crate::simulation::SimulationStats;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const HISTOGRAM_BINS: usize = 15;
const HISTOGRAM_WIDTH: usize = 40;

/// Print a boxed banner.
pub fn print_banner(title: &str) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║ {title:<61} ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");
}

/// Print version information.
pub fn print_version() {
    println!(
        "sanicost {} ({})",
        env!("SANICOST_VERSION"),
        env!("GIT_HASH")
    );
}

/// Print help message.
pub fn print_help() {
    println!(
        r"sanicost - economic cost of inadequate sanitation

USAGE:
    sanicost <COMMAND> [OPTIONS]

COMMANDS:
    evaluate <analysis.yaml>     Evaluate the cost model once
        --json                   Emit JSON

    simulate <analysis.yaml>     Monte Carlo uncertainty analysis
        -n, --iterations <N>     Override the configured iteration count
        --seed <N>               Override the configured seed
        --json                   Emit JSON

    compare <indicators.yaml>    Rank countries from raw indicators
        -n, --iterations <N>     Iterations per country (default: 2000)
        --seed <N>               Seed for reproducible rankings
        --year <YYYY>            Analysis year (default: current year)
        --sort <gdp|total>       Rank by % of GDP or by USD (default: gdp)
        --json                   Emit JSON

    defaults                     Print the reference analysis config
    countries                    List supported countries
    help                         Show this help message
    version                      Show version information

GLOBAL OPTIONS:
    -v, --verbose                Debug logging (otherwise RUST_LOG, default warn)

EXAMPLES:
    sanicost defaults > malawi.yaml
    sanicost evaluate malawi.yaml
    sanicost simulate malawi.yaml --iterations 10000 --seed 42
    sanicost compare indicators.yaml --sort total
"
    );
}

/// Compact USD figure: `$286.33M`, `$1.20B`, `$950`.
#[must_use]
pub fn format_usd(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1e9 {
        format!("{sign}${:.2}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}${:.2}M", abs / 1e6)
    } else if abs >= 1e3 {
        format!("{sign}${:.1}K", abs / 1e3)
    } else {
        format!("{sign}${abs:.0}")
    }
}

/// Render a single evaluation.
#[must_use]
pub fn render_evaluation(inputs: &ModelInputs, outputs: &ModelOutputs) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{RULE}");
    let _ = writeln!(
        s,
        "Analysis year {} · {} · mortality: {}",
        inputs.macro_.analysis_year,
        outputs.currency_code,
        inputs.macro_.mortality_method.as_str()
    );
    let _ = writeln!(s, "{RULE}\n");

    let total = outputs.total_cost_usd;
    let _ = writeln!(s, "{:<24} {:>14} {:>8}", "Category", "USD", "Share");
    for (category, value) in outputs.costs_usd.iter() {
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        let _ = writeln!(
            s,
            "{:<24} {:>14} {:>7.1}%",
            category.label(),
            format_usd(value),
            share
        );
    }
    let _ = writeln!(s);
    let _ = writeln!(s, "Total (USD):     {}", format_usd(total));
    let _ = writeln!(
        s,
        "Total ({}):     {:.0}",
        outputs.currency_code, outputs.total_cost_local
    );
    let _ = writeln!(s, "Share of GDP:    {:.2}%", outputs.percent_gdp);
    let _ = writeln!(
        s,
        "Largest driver:  {}",
        outputs.costs_usd.dominant().label()
    );
    s
}

/// Print a single evaluation.
pub fn print_evaluation(inputs: &ModelInputs, outputs: &ModelOutputs) {
    print!("{}", render_evaluation(inputs, outputs));
}

/// Render simulation statistics with a text histogram.
#[must_use]
pub fn render_simulation(stats: &SimulationStats, seed: u64) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{RULE}");
    let _ = writeln!(s, "Iterations: {}   Seed: {seed}", stats.iterations);
    let _ = writeln!(s, "{RULE}\n");

    let _ = writeln!(s, "Mean:     {}", format_usd(stats.mean));
    let _ = writeln!(s, "Median:   {}", format_usd(stats.median));
    let _ = writeln!(
        s,
        "90% CI:   {} – {}",
        format_usd(stats.p5),
        format_usd(stats.p95)
    );
    let _ = writeln!(
        s,
        "Std dev:  {} (CV {:.1}%)",
        format_usd(stats.std_dev),
        stats.coefficient_of_variation() * 100.0
    );

    let _ = writeln!(s, "\nMean breakdown:");
    for category in CostCategory::ALL {
        let _ = writeln!(
            s,
            "  {:<24} {:>14}",
            category.label(),
            format_usd(stats.mean_breakdown.get(category))
        );
    }

    let bins = stats.histogram(HISTOGRAM_BINS);
    let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);
    if peak > 0 {
        let _ = writeln!(s, "\nDistribution of total cost:");
        for bin in &bins {
            let width = bin.count * HISTOGRAM_WIDTH / peak;
            let _ = writeln!(
                s,
                "  {:>10} │{:<w$} {}",
                format_usd(bin.center()),
                "█".repeat(width),
                bin.count,
                w = HISTOGRAM_WIDTH
            );
        }
    }
    s
}

/// Print simulation statistics.
pub fn print_simulation(stats: &SimulationStats, seed: u64) {
    print!("{}", render_simulation(stats, seed));
}

/// Render a ranked comparison table.
#[must_use]
pub fn render_comparison(results: &[CountryComparison], sort: ComparisonSort) -> String {
    let mut s = String::new();
    let key = match sort {
        ComparisonSort::PercentGdp => "% of GDP",
        ComparisonSort::TotalCost => "total USD",
    };
    let _ = writeln!(s, "{RULE}");
    let _ = writeln!(s, "{} countries ranked by {key}", results.len());
    let _ = writeln!(s, "{RULE}\n");
    let _ = writeln!(
        s,
        "{:>3}  {:<26} {:>12} {:>9} {:>25}",
        "#", "Country", "Mean", "% GDP", "90% CI"
    );
    for (rank, r) in results.iter().enumerate() {
        let _ = writeln!(
            s,
            "{:>3}  {:<26} {:>12} {:>8.2}% {:>25}",
            rank + 1,
            format!("{} ({})", r.name, r.code),
            format_usd(r.stats.mean),
            r.percent_gdp_mean,
            format!("{} – {}", format_usd(r.stats.p5), format_usd(r.stats.p95))
        );
    }
    s
}

/// Print a ranked comparison table.
pub fn print_comparison(results: &[CountryComparison], sort: ComparisonSort) {
    print!("{}", render_comparison(results, sort));
}

/// Print the supported-country table.
pub fn print_countries() {
    println!("{:<6} {:<28} {}", "Code", "Country", "Currency");
    for c in &SUPPORTED_COUNTRIES {
        println!("{:<6} {:<28} {}", c.code, c.name, c.currency);
    }
}
