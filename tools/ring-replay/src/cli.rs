//! Command-line interface definitions for ring-replay.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Replay, trace and fuzz sentinel-slot ring buffers.
#[derive(Parser)]
#[command(name = "ring-replay", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress per-scenario output; show only failures and the final summary.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output with file loads, seeds and timings.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Replay scenario files and check every expected outcome.
    Run(RunArgs),
    /// Replay one scenario and print the ring state after every step.
    Trace(TraceArgs),
    /// Drive a ring with random operations against a reference queue.
    Fuzz(FuzzArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Parser)]
pub struct RunArgs {
    /// Scenario files (TOML).
    #[arg(required = true)]
    pub scenarios: Vec<PathBuf>,

    /// Emit the reports as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `trace` subcommand.
#[derive(Parser)]
pub struct TraceArgs {
    /// Scenario file (TOML).
    pub scenario: PathBuf,

    /// Emit the trace as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fuzz` subcommand.
#[derive(Parser)]
pub struct FuzzArgs {
    /// Usable capacity of the ring under test (at most 1048576).
    #[arg(long, short = 'c', default_value_t = 15)]
    pub capacity: usize,

    /// Number of random operations to perform.
    #[arg(long, default_value_t = 100_000)]
    pub ops: usize,

    /// PRNG seed (omitted = derived from the system clock).
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}
