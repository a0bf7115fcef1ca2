//! Cache replacement-policy comparison CLI.
//!
//! This binary is the single entry point for the simulator. It performs:
//! 1. **Comparison run (default):** Replay the matrix-multiply workload
//!    against both replacement policies and print the summary table.
//! 2. **Single-policy run:** `--policy lru` or `--policy plru`.
//! 3. **Config override:** `--config <file.json>` replaces the built-in
//!    defaults (timing model, workload dimensions, matrix placement).

use clap::Parser;
use std::{fs, process};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{ReplacementPolicy, SimConfig};
use cachesim_core::sim;
use cachesim_core::stats;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    version,
    about = "Cycle-accurate cache replacement-policy simulator",
    long_about = "Replay a deterministic matrix-multiply access pattern through a 16-set,\n\
                  4-way write-back cache, once per replacement policy, and report the\n\
                  aggregate hit rate and total cycle count for each.\n\n\
                  Examples:\n  \
                  sim\n  \
                  sim --policy plru\n  \
                  sim --config sweep.json"
)]
struct Cli {
    /// JSON configuration file (built-in defaults when omitted).
    #[arg(short, long)]
    config: Option<String>,

    /// Run a single policy (lru or plru) instead of both.
    #[arg(short, long)]
    policy: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => load_config(&path),
        None => SimConfig::default(),
    };

    let reports = match cli.policy.as_deref() {
        None => sim::run_comparison(&config),
        Some(name) => sim::run_policy(&config, parse_policy(name)).map(|report| vec![report]),
    };

    match reports {
        Ok(reports) => stats::print_report(&reports),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Reads and parses a JSON configuration file, exiting on failure.
fn load_config(path: &str) -> SimConfig {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {path}: {e}");
        process::exit(1);
    })
}

/// Maps a policy name from the command line to the config enum, exiting on
/// an unknown name.
fn parse_policy(name: &str) -> ReplacementPolicy {
    match name.to_ascii_lowercase().as_str() {
        "lru" => ReplacementPolicy::Lru,
        "plru" | "pseudo-lru" => ReplacementPolicy::Plru,
        other => {
            eprintln!("Error: unknown policy '{other}' (expected lru or plru)");
            process::exit(1);
        }
    }
}
