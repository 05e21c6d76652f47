//! Sync and check command implementations
//!
//! Both commands plan against Steam's grid folder; only `sync` applies the plan.

use colored::{ColoredString, Colorize};
use grid_core::{BatchReporter, Report, ReportLine, SyncOutcome};

use crate::context::RunContext;
use crate::error::{CliError, Result};
use crate::interactive;

/// Queues longer than this are summarized without listing each image.
const QUEUE_LISTING_LIMIT: usize = 10;

/// Flags of the sync command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub dry_run: bool,
    pub yes: bool,
    pub json: bool,
}

/// Label colored by outcome, padded to the report column.
fn paint(label: &str) -> ColoredString {
    let padded = format!("{:<7}", label);
    match label {
        "QUEUED" => padded.blue().bold(),
        "UPDATED" => padded.green().bold(),
        "SKIPPED" => padded.dimmed(),
        "MISSING" | "INVALID" | "DUPLICATE" => padded.yellow().bold(),
        "FAILED" => padded.red().bold(),
        _ => padded.magenta().bold(),
    }
}

fn print_line(line: &ReportLine) {
    println!("{} {}", paint(line.label), line.detail);
}

fn print_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn queued_message(count: usize) -> String {
    match count {
        1 => "1 image is queued for update".to_string(),
        n => format!("{n} images are queued for update"),
    }
}

/// Print every non-queued line, then the queue summary.
fn print_plan(report: &Report) {
    for line in report.lines_where(|o| o != Some(&SyncOutcome::Queued)) {
        print_line(line);
    }

    let queued = report.counts.queued;
    if queued == 0 {
        println!("{} Everything is up to date.", "OK".green().bold());
        return;
    }

    println!();
    println!("{} {}", "=>".blue().bold(), queued_message(queued));
    if queued <= QUEUE_LISTING_LIMIT {
        for line in report.lines_where(|o| o == Some(&SyncOutcome::Queued)) {
            print_line(line);
        }
    }
}

/// Run the check command
///
/// Plans a sync and reports it. Never prompts, never writes.
pub fn run_check(ctx: &RunContext, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let plan = engine.plan(engine.scan()?)?;
    let report = BatchReporter::summarize(&plan);

    if json {
        return print_json(&report);
    }
    print_plan(&report);
    Ok(())
}

/// Run the sync command
///
/// Plans, asks for confirmation, then updates the queued images.
pub fn run_sync(ctx: &RunContext, options: SyncOptions) -> Result<()> {
    let engine = ctx.engine()?;
    let plan = engine.plan(engine.scan()?)?;
    let planned = BatchReporter::summarize(&plan);

    if !options.json {
        print_plan(&planned);
    }

    if options.dry_run || !plan.has_pending_updates() {
        if options.json {
            print_json(&planned)?;
        }
        return Ok(());
    }

    if !options.yes {
        if !ctx.interactive {
            return Err(CliError::user(
                "Not running in a terminal; pass --yes to update without confirmation.",
            ));
        }
        println!();
        if !interactive::confirm("Update the queued images?")? {
            println!("{} Nothing was changed.", "=>".blue().bold());
            return Ok(());
        }
    }

    let done = engine.execute(plan)?;
    let report = BatchReporter::summarize(&done);

    if options.json {
        print_json(&report)?;
    } else {
        println!();
        let applied = |o: Option<&SyncOutcome>| {
            o.is_some_and(|o| *o == SyncOutcome::Updated || o.is_failure())
        };
        for line in report.lines_where(applied) {
            print_line(line);
        }
        println!();
        println!(
            "{} Restart Steam if you don't see changes.",
            "=>".blue().bold()
        );
    }

    if !options.json {
        if ctx.interactive {
            interactive::next_action_loop(engine.paths())?;
        } else {
            println!("{}", "Not a terminal; skipping the folder menu.".dimmed());
        }
    }

    match report.failure_message() {
        Some(message) => Err(CliError::user(message)),
        None => Ok(()),
    }
}
