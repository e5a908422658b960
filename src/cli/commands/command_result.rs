use std::path::PathBuf;

use super::super::args::FormFormat;
use super::super::exit_status::ExitStatus;
use crate::forms::{SubmissionReport, TranslationForm};
use crate::stats::RefreshReport;

#[derive(Debug)]
pub enum CommandSummary {
    StatsUpdate(StatsUpdateSummary),
    /// The selectors resolved to no resource; nothing was touched.
    NoResources,
    Form(FormSummary),
    Apply(ApplySummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct StatsUpdateSummary {
    pub store_path: PathBuf,
    pub report: RefreshReport,
}

#[derive(Debug)]
pub struct FormSummary {
    pub format: FormFormat,
    pub forms: Vec<RenderedForm>,
    pub failures: Vec<CatalogFailure>,
}

#[derive(Debug)]
pub struct RenderedForm {
    pub path: PathBuf,
    pub form: TranslationForm,
}

#[derive(Debug)]
pub struct CatalogFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug)]
pub struct ApplySummary {
    pub catalog_path: PathBuf,
    pub report: SubmissionReport,
    pub written: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

impl CommandSummary {
    pub fn exit_status(&self) -> ExitStatus {
        let failed = match self {
            CommandSummary::StatsUpdate(summary) => !summary.report.is_success(),
            CommandSummary::NoResources => true,
            CommandSummary::Form(summary) => !summary.failures.is_empty(),
            CommandSummary::Apply(summary) => summary.report.has_conflicts(),
            CommandSummary::Init(summary) => !summary.created,
        };
        if failed {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

/// Result of running transkit commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
}

impl From<CommandSummary> for CommandResult {
    fn from(summary: CommandSummary) -> Self {
        let exit_status = summary.exit_status();
        Self {
            summary,
            exit_status,
        }
    }
}
