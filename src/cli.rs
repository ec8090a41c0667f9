use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rustdoc-sidebar")]
#[command(about = "Inspect and validate rustdoc sidebar-items.js indexes", long_about = None)]
pub struct Cli {
    /// Global identifier the payload is assigned to
    #[arg(long, global = true, default_value = crate::sidebar::DEFAULT_GLOBAL)]
    pub global: String,
    /// Reject category labels rustdoc is not known to emit
    #[arg(long, global = true)]
    pub strict: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the items of a single sidebar-items.js file
    Show {
        file: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Print one category of one module of a documentation tree
    Lookup {
        doc_root: String,
        module: String,
        category: String,
    },
    /// Validate every index under a documentation tree
    Check {
        doc_root: String,
        #[arg(long)]
        lint: bool,
    },
    /// Rank items across a documentation tree by name
    Search {
        doc_root: String,
        query: String,
        #[arg(short = 'n', long, default_value = "25")]
        limit: usize,
    },
    /// Print a file's payload as pretty JSON, keys in file order
    Json { file: String },
}

impl Cli {
    pub fn parse_options(&self) -> crate::sidebar::ParseOptions {
        crate::sidebar::ParseOptions {
            global: self.global.clone(),
            strict_categories: self.strict,
        }
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(expand_tilde(path).into_owned())
}
