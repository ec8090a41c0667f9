//! Loading, validating and re-serializing rustdoc `sidebar-items.js` files.

pub(crate) mod index;
pub mod lint;
pub(crate) mod script;

pub use index::SidebarIndex;
pub use lint::{LintFinding, LintKind, lint};
pub use script::{DEFAULT_GLOBAL, EnvelopeForm, ParseOptions};

/// File name rustdoc gives every module's sidebar index.
pub const SIDEBAR_FILE_NAME: &str = "sidebar-items.js";
