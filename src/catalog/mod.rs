//! Gettext catalogs: the entry model the forms work on, and `.po` file I/O.

mod entry;
mod po;

pub use entry::{CatalogEntry, FUZZY_FLAG};
pub use po::{Catalog, CatalogError, parse_catalog, parse_file, write_catalog};
