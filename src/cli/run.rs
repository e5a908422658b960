use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, apply::apply, form::form, init::init, stats_update::stats_update},
};

/// Dispatch to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::StatsUpdate(cmd)) => stats_update(cmd),
        Some(Command::Form(cmd)) => form(cmd),
        Some(Command::Apply(cmd)) => apply(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
