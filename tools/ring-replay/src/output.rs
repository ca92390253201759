//! Terminal output formatting for replay and fuzz results.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fuzz::FuzzReport;
use crate::replay::ScenarioReport;
use crate::verbose::dprintln;

/// Print any report as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing report to JSON")?;
    println!("{json}");
    Ok(())
}

/// Print one line per scenario, plus the failing steps of failed scenarios.
pub fn print_run_summary(reports: &[ScenarioReport]) {
    for report in reports {
        let verdict = if report.passed { "ok" } else { "FAILED" };
        dprintln!(
            "  {:<40}  {:>4} steps  {verdict}",
            report.name,
            report.steps.len()
        );
        for step in report.failures() {
            println!(
                "    step {:>3}: {:<14} observed {}, expected {}",
                step.index,
                step.op,
                step.observed,
                step.expected
                    .map_or_else(|| "-".to_owned(), |e| e.to_string())
            );
        }
    }

    let failed = reports.iter().filter(|r| !r.passed).count();
    println!(
        "\n  {} scenarios, {} passed, {failed} failed",
        reports.len(),
        reports.len() - failed
    );
}

/// Print every step of a scenario as a table.
pub fn print_trace(report: &ScenarioReport) {
    println!(
        "  {} (capacity {}, {:?} membership)",
        report.name, report.capacity, report.membership
    );
    println!();
    println!(
        "  {:>4}  {:<14}  {:<8}  {:<8}  {:>5}  {:>5}  {:>5}  {:<7}",
        "Step", "Op", "Result", "Expect", "Head", "Tail", "Len", "State"
    );
    println!(
        "  {:->4}  {:-<14}  {:-<8}  {:-<8}  {:->5}  {:->5}  {:->5}  {:-<7}",
        "", "", "", "", "", "", "", ""
    );

    for step in &report.steps {
        let expected = step
            .expected
            .map_or_else(|| "-".to_owned(), |e| e.to_string());
        let flag = if step.passed { "" } else { "  MISMATCH" };
        println!(
            "  {:>4}  {:<14}  {:<8}  {:<8}  {:>5}  {:>5}  {:>5}  {:<7}{flag}",
            step.index,
            step.op,
            step.observed.to_string(),
            expected,
            step.head,
            step.tail,
            step.len,
            step.state
        );
    }
}

/// Print the counters and verdict of a fuzz run.
pub fn print_fuzz(report: &FuzzReport) {
    dprintln!(
        "  capacity {}, seed {:#x}: {} ops ({} appends, {} pops, {} clears)",
        report.capacity,
        report.seed,
        report.ops_run,
        report.appends,
        report.pops,
        report.clears
    );
    dprintln!(
        "  rejected: {} full, {} empty",
        report.rejected_full,
        report.rejected_empty
    );

    match &report.divergence {
        None => println!("  no divergence"),
        Some(d) => println!(
            "  DIVERGENCE at op {} ({}): {}",
            d.op_index, d.op, d.detail
        ),
    }
}
