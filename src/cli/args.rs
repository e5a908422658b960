//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `stats-update`: Recompute per-language statistics of resources
//! - `form`: Build translation forms from gettext catalogs
//! - `apply`: Apply a posted form back onto a catalog
//! - `init`: Initialize transkit configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::StatsUpdate(cmd)) => cmd.common.verbose,
            Some(Command::Form(cmd)) => cmd.common.verbose,
            Some(Command::Apply(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct StatsUpdateCommand {
    /// Resources to update as <project>.<resource> (default: all)
    pub selectors: Vec<String>,

    /// Store file (overrides config file)
    #[arg(long, env = "TRANSKIT_STORE")]
    pub store: Option<PathBuf>,

    /// Abort on the first failing resource (overrides config file)
    #[arg(long)]
    pub fail_fast: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormFormat {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Args)]
pub struct FormCommand {
    /// Catalog files, or directories searched for *.po files
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormFormat::Html)]
    pub format: FormFormat,

    /// Characters per textarea row (overrides config file)
    #[arg(long)]
    pub chars_per_row: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Catalog the form was built from
    pub catalog: PathBuf,

    /// JSON object of posted field values
    pub submission: PathBuf,

    /// Actually rewrite the catalog (default is dry-run)
    #[arg(long)]
    pub write: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recompute translation statistics for resources
    StatsUpdate(StatsUpdateCommand),
    /// Build translation forms from gettext catalogs
    Form(FormCommand),
    /// Apply a submitted translation form to a catalog
    Apply(ApplyCommand),
    /// Initialize a new .transkitrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
