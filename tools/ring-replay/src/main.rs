//! Ring buffer replay tool.
//!
//! Drives a `sentinel_ring::ByteRing` from scenario files or from a seeded
//! random operation stream, and reports every place where the ring's
//! behavior differs from what was expected.
//!
//! Commands: `run` (verify scenarios) → `trace` (step-by-step state of one
//! scenario) → `fuzz` (random ops checked against a `VecDeque` model).

mod cli;
mod fuzz;
mod output;
mod replay;
mod scenario;
mod verbose;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use clap::Parser;

use verbose::{Stopwatch, vprintln};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    match cli.command {
        cli::Command::Run(ref args) => cmd_run(args),
        cli::Command::Trace(ref args) => cmd_trace(args),
        cli::Command::Fuzz(ref args) => cmd_fuzz(args),
    }
}

// ===========================================================================
// Commands
// ===========================================================================

/// Replay every scenario; fail if any expectation was not met.
fn cmd_run(args: &cli::RunArgs) -> Result<()> {
    let mut reports = Vec::with_capacity(args.scenarios.len());
    for path in &args.scenarios {
        vprintln!("loading {}", path.display());
        let scenario = scenario::load(path)?;

        let _sw =
            Stopwatch::start(format!("replay {}", scenario.name())).ops(scenario.steps.len());
        reports.push(replay::replay(&scenario)?);
    }

    if args.json {
        output::print_json(&reports)?;
    } else {
        output::print_run_summary(&reports);
    }

    let failed = reports.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        bail!("{failed} of {} scenarios failed", reports.len());
    }
    Ok(())
}

/// Replay one scenario and show the ring state after each step.
fn cmd_trace(args: &cli::TraceArgs) -> Result<()> {
    vprintln!("loading {}", args.scenario.display());
    let scenario = scenario::load(&args.scenario)?;
    let report = replay::replay(&scenario)?;

    if args.json {
        output::print_json(&report)?;
    } else {
        output::print_trace(&report);
    }

    if !report.passed {
        bail!("scenario '{}' failed", report.name);
    }
    Ok(())
}

/// Run the randomized model check.
fn cmd_fuzz(args: &cli::FuzzArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    vprintln!("fuzz seed: {seed:#x}");

    let config = fuzz::FuzzConfig {
        capacity: args.capacity,
        ops: args.ops,
        seed,
    };
    let sw = Stopwatch::start(format!("fuzz capacity {}", config.capacity));
    let report = fuzz::run(&config)?;
    drop(sw.ops(report.ops_run));

    if args.json {
        output::print_json(&report)?;
    } else {
        output::print_fuzz(&report);
    }

    if let Some(d) = &report.divergence {
        bail!(
            "ring diverged from the model at op {} (rerun with --seed {seed})",
            d.op_index
        );
    }
    Ok(())
}

/// Seed derived from the wall clock, for runs without `--seed`.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()).rotate_left(32))
}
