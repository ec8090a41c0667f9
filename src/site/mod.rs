//! Generated documentation trees: discovery and cached access.

pub(crate) mod catalog;
pub(crate) mod discovery;

pub use catalog::{CheckReport, DEFAULT_CACHE_SIZE, SiteCatalog};
pub use discovery::discover_sidebar_files;
