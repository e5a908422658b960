//! Diagnostics on stderr through the `log` facade.
//!
//! Only records from this crate are printed; stdout stays reserved for
//! command output (and for the MCP transport under `serve`).

use std::io::Write;

use colored::Colorize;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

/// Overrides every other level setting when set, e.g. `TRANSKIT_LOG=debug`.
pub const LOG_ENV_VAR: &str = "TRANSKIT_LOG";

/// The environment wins, then `-v` (at least debug), then the configured level.
pub fn resolve_level(configured: LevelFilter, verbose: bool, env: Option<&str>) -> LevelFilter {
    if let Some(level) = env.and_then(|value| value.trim().parse().ok()) {
        return level;
    }
    if verbose {
        configured.max(LevelFilter::Debug)
    } else {
        configured
    }
}

/// Install the logger. Calling it again only changes the level.
pub fn init(level: LevelFilter) {
    let installed = Builder::new()
        .filter_level(LevelFilter::Off)
        .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Trace)
        .target(Target::Stderr)
        .format(|buf, record| {
            let label = match record.level() {
                Level::Error => "error:".bold().red(),
                Level::Warn => "warning:".bold().yellow(),
                Level::Info => "info:".bold().green(),
                Level::Debug => "debug:".bold().blue(),
                Level::Trace => "trace:".dimmed(),
            };
            writeln!(buf, "{} {}", label, record.args())
        })
        .try_init();
    if installed.is_err() {
        log::trace!("logger already installed");
    }
    log::set_max_level(level);
}

/// [`resolve_level`] with the environment variable read, then [`init`].
pub fn init_from(configured: LevelFilter, verbose: bool) -> LevelFilter {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(configured, verbose, env.as_deref());
    init(level);
    level
}
