use std::path::Path;

use anyhow::{Context, Result};

use super::super::args::StatsUpdateCommand;
use super::super::report::ConsoleProgress;
use super::{
    helper::CommandContext,
    {CommandResult, CommandSummary, StatsUpdateSummary},
};
use crate::stats::{FailurePolicy, MemoryStore, RefreshError, StatsRefresher};

pub fn stats_update(cmd: StatsUpdateCommand) -> Result<CommandResult> {
    let ctx = CommandContext::load(cmd.common.verbose)?;

    let store_path = cmd
        .store
        .clone()
        .unwrap_or_else(|| ctx.config.resolve_store_path(&ctx.root));
    let store = MemoryStore::load(&store_path)
        .with_context(|| format!("Failed to load store {}", store_path.display()))?;

    let policy = if cmd.fail_fast {
        FailurePolicy::FailFast
    } else {
        ctx.config.failure_policy
    };
    log::debug!("failure policy: {:?}", policy);

    let progress = ConsoleProgress::new(cmd.common.verbose);
    let result = StatsRefresher::new(&store)
        .policy(policy)
        .progress(&progress)
        .refresh(&cmd.selectors);

    match result {
        Ok(report) => {
            save(&store, &store_path)?;
            Ok(CommandResult::from(CommandSummary::StatsUpdate(
                StatsUpdateSummary { store_path, report },
            )))
        }
        Err(RefreshError::NoResourcesFound) => Ok(CommandResult::from(CommandSummary::NoResources)),
        Err(err @ RefreshError::Resource { .. }) => {
            // keep what the resources before the failing one achieved
            save(&store, &store_path)?;
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn save(store: &MemoryStore, path: &Path) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("Failed to save store {}", path.display()))
}
