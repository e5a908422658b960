use std::fs;

use anyhow::{Context, Result};

use super::super::args::ApplyCommand;
use super::{
    helper::CommandContext,
    {ApplySummary, CommandResult, CommandSummary},
};
use crate::catalog::{parse_file, write_catalog};
use crate::forms::{apply_submission, parse_submission};

pub fn apply(cmd: ApplyCommand) -> Result<CommandResult> {
    let _ctx = CommandContext::load(cmd.common.verbose)?;

    let mut catalog = parse_file(&cmd.catalog)
        .with_context(|| format!("Failed to parse catalog {}", cmd.catalog.display()))?;
    let raw = fs::read_to_string(&cmd.submission)
        .with_context(|| format!("Failed to read submission {}", cmd.submission.display()))?;
    let submission = parse_submission(&raw)
        .with_context(|| format!("Invalid submission {}", cmd.submission.display()))?;

    let report = apply_submission(catalog.entries_mut(), &submission)
        .with_context(|| format!("Invalid submission {}", cmd.submission.display()))?;
    log::debug!(
        "{} updated, {} conflicting, {} unchanged",
        report.updated.len(),
        report.conflicts.len(),
        report.unchanged
    );

    let written = cmd.write && !report.updated.is_empty();
    if written {
        fs::write(&cmd.catalog, write_catalog(&mut catalog))
            .with_context(|| format!("Failed to write catalog {}", cmd.catalog.display()))?;
    }

    Ok(CommandResult::from(CommandSummary::Apply(ApplySummary {
        catalog_path: cmd.catalog,
        report,
        written,
    })))
}
