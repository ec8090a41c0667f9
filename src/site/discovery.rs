//! Finding every sidebar index under a generated documentation tree.

use crate::error::Result;
use crate::sidebar::SIDEBAR_FILE_NAME;
use crate::types::ModulePath;
use anyhow::Context;
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Walks `root` and maps each module path to its `sidebar-items.js`.
///
/// The module path is the file's directory relative to `root`, so
/// `doc/image/imageops/sidebar-items.js` is registered as `image::imageops`.
/// Ignore files are not honoured: doc trees usually live under `target/`,
/// which VCS ignore rules exclude.
pub fn discover_sidebar_files(root: &Path) -> Result<BTreeMap<ModulePath, PathBuf>> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("Documentation root not found: {}", root.display()))?;
    anyhow::ensure!(
        metadata.is_dir(),
        "Documentation root is not a directory: {}",
        root.display()
    );

    let mut files = BTreeMap::new();

    let entries = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| entry.file_name() == SIDEBAR_FILE_NAME);

    for entry in entries {
        let path = entry.path();
        let Some(relative_dir) = path.parent().and_then(|dir| dir.strip_prefix(root).ok()) else {
            continue;
        };

        match ModulePath::from_relative_dir(relative_dir) {
            Some(module) if !module.is_root() => {
                tracing::debug!(module = %module, path = %path.display(), "Found sidebar index");
                files.insert(module, path.to_path_buf());
            }
            _ => {
                tracing::debug!(path = %path.display(), "Ignoring sidebar index outside a module directory");
            }
        }
    }

    tracing::info!(root = %root.display(), count = files.len(), "Discovered sidebar indexes");
    Ok(files)
}
