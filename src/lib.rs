//! Transkit - translation statistics and catalog-driven translation forms
//!
//! Transkit is a CLI tool and library for two chores of a translation
//! management system: keeping per-language completion statistics of
//! localization resources up to date, and turning gettext catalogs into
//! editable translation forms (and posted forms back into catalogs).
//!
//! ## Module Structure
//!
//! - `catalog`: Gettext entry model and `.po` file I/O via `rspolib`
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `forms`: Translation form building, rendering and submission
//! - `logging`: Stderr logger behind the `log` facade
//! - `mcp`: Model Context Protocol server implementation
//! - `stats`: Statistics records and the batch refresher

pub mod catalog;
pub mod cli;
pub mod config;
pub mod forms;
pub mod logging;
pub mod mcp;
pub mod stats;
