//! Report formatting and printing utilities.
//!
//! Separate from the commands so the library stays usable without a
//! terminal.

use std::io::{self, Write};

use colored::Colorize;
use indexmap::IndexMap;
use unicode_width::UnicodeWidthStr;

use super::args::FormFormat;
use super::commands::{
    ApplySummary, CommandResult, CommandSummary, FormSummary, InitSummary, StatsUpdateSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::forms::SubmissionConflict;
use crate::stats::{FailedResource, Progress, RefreshEvent};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Prints refresh progress to stdout as it happens.
pub struct ConsoleProgress {
    verbose: bool,
}

impl ConsoleProgress {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Progress for ConsoleProgress {
    fn report(&self, event: &RefreshEvent<'_>) {
        let mut out = io::stdout().lock();
        match event {
            RefreshEvent::Removed(_) if self.verbose => {
                let _ = writeln!(out, "{}", event.to_string().dimmed());
            }
            // failures are summarized once the batch is done
            RefreshEvent::Removed(_) | RefreshEvent::Failed { .. } => {}
            _ => {
                let _ = writeln!(out, "{}", event);
            }
        }
    }
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::StatsUpdate(summary) => {
            print_stats_update_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::NoResources => {
            print_no_resources_to(&mut io::stderr().lock());
        }
        CommandSummary::Form(summary) => {
            print_forms_to(summary, &mut io::stdout().lock());
            print_form_failures_to(summary, &mut io::stderr().lock());
        }
        CommandSummary::Apply(summary) => {
            print_apply_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

pub fn print_no_resources_to<W: Write>(writer: &mut W) {
    let _ = writeln!(writer, "No resources suitable for updating found. Exiting...");
}

pub fn print_stats_update_to<W: Write>(summary: &StatsUpdateSummary, writer: &mut W) {
    let report = &summary.report;
    let updated = report.resources.len();

    if updated > 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Updated {} {}: {} statistics refreshed, {} created, {} removed",
                updated,
                if updated == 1 { "resource" } else { "resources" },
                report.refreshed,
                report.created,
                report.removed
            )
            .green()
        );
    }

    if !report.failed.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} {} failed:",
            FAILURE_MARK.red(),
            report.failed.len(),
            if report.failed.len() == 1 {
                "resource"
            } else {
                "resources"
            }
        );
        print_failed_table(&report.failed, writer);
    }
}

fn print_failed_table<W: Write>(failed: &[FailedResource], writer: &mut W) {
    let width = failed
        .iter()
        .map(|f| UnicodeWidthStr::width(f.resource.as_str()))
        .max()
        .unwrap_or(0);
    for failure in failed {
        let _ = writeln!(
            writer,
            "  {}  {}",
            pad(&failure.resource, width).bold(),
            failure.error
        );
    }
}

pub fn print_forms_to<W: Write>(summary: &FormSummary, writer: &mut W) {
    match summary.format {
        FormFormat::Html => {
            for rendered in &summary.forms {
                let _ = writeln!(
                    writer,
                    r#"<form method="post" data-catalog="{}">"#,
                    rendered.path.display()
                );
                if !rendered.form.is_empty() {
                    let _ = writeln!(writer, "{}", rendered.form.render_html());
                }
                let _ = writeln!(writer, "</form>");
            }
        }
        FormFormat::Json => {
            let forms: IndexMap<String, _> = summary
                .forms
                .iter()
                .map(|rendered| (rendered.path.display().to_string(), &rendered.form))
                .collect();
            match serde_json::to_string_pretty(&forms) {
                Ok(json) => {
                    let _ = writeln!(writer, "{}", json);
                }
                Err(err) => log::error!("failed to serialize forms: {}", err),
            }
        }
    }
}

pub fn print_form_failures_to<W: Write>(summary: &FormSummary, writer: &mut W) {
    for failure in &summary.failures {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            "error:".bold().red(),
            failure.path.display(),
            failure.error
        );
    }
}

pub fn print_apply_to<W: Write>(summary: &ApplySummary, writer: &mut W) {
    let report = &summary.report;
    let updated = report.updated.len();

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} updated, {} unchanged",
            updated,
            if updated == 1 { "entry" } else { "entries" },
            report.unchanged
        )
        .green()
    );

    if report.has_conflicts() {
        let _ = writeln!(
            writer,
            "{} {} {} (source text changed since the form was built):",
            FAILURE_MARK.red(),
            report.conflicts.len(),
            if report.conflicts.len() == 1 {
                "conflict"
            } else {
                "conflicts"
            }
        );
        print_conflicts(&report.conflicts, writer);
    }

    if summary.written {
        let _ = writeln!(
            writer,
            "{} {}",
            "Wrote".green().bold(),
            summary.catalog_path.display()
        );
    } else if updated > 0 {
        let _ = writeln!(
            writer,
            "{}",
            "Dry run, use --write to save the catalog".dimmed()
        );
    }
}

fn print_conflicts<W: Write>(conflicts: &[SubmissionConflict], writer: &mut W) {
    let labels: Vec<String> = conflicts.iter().map(|c| format!("#{}", c.index)).collect();
    let width = labels
        .iter()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0);
    for (label, conflict) in labels.iter().zip(conflicts) {
        let _ = writeln!(
            writer,
            "  {}  {:?} {} {:?}",
            pad(label, width),
            conflict.msgid,
            "submitted as".dimmed(),
            conflict.submitted_msgid
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

/// Right-pad to a display width, so wide characters line up.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}
