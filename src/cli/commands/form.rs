use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;
use walkdir::WalkDir;

use super::super::args::FormCommand;
use super::{
    helper::CommandContext,
    {CatalogFailure, CommandResult, CommandSummary, FormSummary, RenderedForm},
};
use crate::catalog::parse_file;
use crate::forms::{FormOptions, TranslationForm};

const CATALOG_EXTENSION: &str = "po";

pub fn form(cmd: FormCommand) -> Result<CommandResult> {
    let ctx = CommandContext::load(cmd.common.verbose)?;
    let options = FormOptions {
        chars_per_row: cmd.chars_per_row.unwrap_or(ctx.config.chars_per_row).max(1),
    };

    let catalogs = collect_catalogs(&cmd.paths)?;
    if catalogs.is_empty() {
        bail!("No .{} files found", CATALOG_EXTENSION);
    }
    log::debug!("building forms for {} catalog(s)", catalogs.len());

    let results: Vec<(PathBuf, Result<TranslationForm, String>)> = catalogs
        .into_par_iter()
        .map(|path| {
            let form = parse_file(&path)
                .map(|catalog| TranslationForm::build_with(catalog.entries(), options))
                .map_err(|e| e.to_string());
            (path, form)
        })
        .collect();

    let mut forms = Vec::new();
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(form) => forms.push(RenderedForm { path, form }),
            Err(error) => failures.push(CatalogFailure { path, error }),
        }
    }

    Ok(CommandResult::from(CommandSummary::Form(FormSummary {
        format: cmd.format,
        forms,
        failures,
    })))
}

/// Files are taken as given; directories are searched for catalogs in
/// file name order.
fn collect_catalogs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut catalogs = Vec::new();
    for path in paths {
        if path.is_file() {
            catalogs.push(path.clone());
        } else if path.is_dir() {
            catalogs.extend(
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry),
                        Err(err) => {
                            log::warn!("skipping unreadable entry: {}", err);
                            None
                        }
                    })
                    .filter(|entry| entry.file_type().is_file() && is_catalog(entry.path()))
                    .map(|entry| entry.into_path()),
            );
        } else {
            bail!("Path does not exist: {}", path.display());
        }
    }
    Ok(catalogs)
}

fn is_catalog(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CATALOG_EXTENSION))
}
