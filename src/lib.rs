//! Loading, validating and querying rustdoc `sidebar-items.js` indexes.
//!
//! Every module page rustdoc generates comes with a small script that assigns
//! an object literal to `window.SIDEBAR_ITEMS`: item categories mapped to
//! `[name, summary]` pairs. [`SidebarIndex`] is one such file, parsed and
//! validated; [`SiteCatalog`] is every index of a documentation tree.

pub mod cli;
pub mod error;
pub mod format;
pub mod search;
pub mod sidebar;
pub mod site;
pub mod tracing;
pub mod types;

pub use error::SidebarError;
pub use search::{SearchHit, search, search_indexes};
pub use sidebar::{EnvelopeForm, LintFinding, LintKind, ParseOptions, SidebarIndex, lint};
pub use site::{CheckReport, SiteCatalog};
pub use types::{Category, ItemPair, KNOWN_CATEGORIES, ModulePath};
