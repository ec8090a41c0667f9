//! All sidebar indexes of one documentation tree, parsed on demand.

use super::discovery::discover_sidebar_files;
use crate::error::{self, SidebarError};
use crate::sidebar::{ParseOptions, SidebarIndex};
use crate::types::{Category, ItemPair, ModulePath};
use anyhow::Context;
use lru::LruCache;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maximum number of parsed indexes kept in memory.
pub const DEFAULT_CACHE_SIZE: usize = 256;

/// Index of a documentation tree.
///
/// Discovery only records file locations; each module's index is parsed the
/// first time it is requested and then shared through an `Arc`. Parsed
/// indexes are immutable, so any number of tasks may read them concurrently.
pub struct SiteCatalog {
    root: PathBuf,
    files: BTreeMap<ModulePath, PathBuf>,
    options: ParseOptions,
    cache: RwLock<LruCache<ModulePath, Arc<SidebarIndex>>>,
}

impl std::fmt::Debug for SiteCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteCatalog")
            .field("root", &self.root)
            .field("modules", &self.files.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Outcome of validating every index in a catalog.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Indexes that parsed cleanly.
    pub loaded: Vec<Arc<SidebarIndex>>,
    /// Modules whose index failed to load, with the reason.
    pub failures: Vec<(ModulePath, SidebarError)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

impl SiteCatalog {
    /// Discover every `sidebar-items.js` under `root` with default options.
    pub async fn discover(root: impl Into<PathBuf>) -> error::Result<Self> {
        Self::discover_with(root, ParseOptions::default(), DEFAULT_CACHE_SIZE).await
    }

    pub async fn discover_with(
        root: impl Into<PathBuf>,
        options: ParseOptions,
        cache_size: usize,
    ) -> error::Result<Self> {
        let root = root.into();
        let walk_root = root.clone();
        let files = tokio::task::spawn_blocking(move || discover_sidebar_files(&walk_root))
            .await
            .context("Discovery task panicked")??;

        Ok(Self::from_files(root, files, options, cache_size))
    }

    /// Build a catalog from an explicit module-to-file mapping.
    pub fn from_files(
        root: PathBuf,
        files: BTreeMap<ModulePath, PathBuf>,
        options: ParseOptions,
        cache_size: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            root,
            files,
            options,
            cache: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discovered module paths, sorted.
    pub fn modules(&self) -> impl Iterator<Item = &ModulePath> {
        self.files.keys()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, module: &ModulePath) -> bool {
        self.files.contains_key(module)
    }

    /// File backing a module's index.
    pub fn file(&self, module: &ModulePath) -> Option<&Path> {
        self.files.get(module).map(PathBuf::as_path)
    }

    /// Get a module's index, parsing it on first use.
    pub async fn get(&self, module: &ModulePath) -> Result<Arc<SidebarIndex>, SidebarError> {
        {
            let mut cache = self.cache.write().await;
            if let Some(index) = cache.get(module) {
                tracing::debug!(module = %module, "Cache hit");
                return Ok(Arc::clone(index));
            }
        }

        let path = self
            .files
            .get(module)
            .ok_or_else(|| SidebarError::ModuleNotFound(module.to_string()))?;

        tracing::debug!(module = %module, path = %path.display(), "Loading sidebar index");
        let index = Arc::new(
            SidebarIndex::load_async(path, &self.options)
                .await?
                .with_module(module.clone()),
        );

        self.cache
            .write()
            .await
            .put(module.clone(), Arc::clone(&index));
        Ok(index)
    }

    /// Items of one category of one module. Absent categories yield no items.
    pub async fn lookup(
        &self,
        module: &ModulePath,
        category: &Category,
    ) -> Result<Vec<ItemPair>, SidebarError> {
        Ok(self.get(module).await?.get(category).to_vec())
    }

    /// Load every index, collecting failures instead of stopping at the first.
    pub async fn check(&self) -> CheckReport {
        let mut report = CheckReport::default();
        for module in self.files.keys() {
            match self.get(module).await {
                Ok(index) => report.loaded.push(index),
                Err(e) => {
                    tracing::debug!(module = %module, error = %e, "Invalid sidebar index");
                    report.failures.push((module.clone(), e));
                }
            }
        }
        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "Checked sidebar indexes"
        );
        report
    }

    /// Drop every parsed index so the next access re-reads from disk.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use tempfile::TempDir;

    fn site(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (relative, content) in files {
            let path = temp.path().join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        temp
    }

    #[tokio::test]
    async fn test_lazy_loading_and_cache() {
        let temp = site(&[
            ("a/sidebar-items.js", r#"window.SIDEBAR_ITEMS = {"fn":[["f","F."]]};"#),
            ("a/b/sidebar-items.js", r#"window.SIDEBAR_ITEMS = {"struct":[["S","S."]]};"#),
        ]);
        let catalog = SiteCatalog::discover(temp.path()).await.unwrap();
        check!(catalog.len() == 2);
        check!(catalog.cached_len().await == 0);

        let module = ModulePath::parse("a::b");
        let first = catalog.get(&module).await.unwrap();
        let second = catalog.get(&module).await.unwrap();
        check!(Arc::ptr_eq(&first, &second));
        check!(first.module() == Some(&module));
        check!(catalog.cached_len().await == 1);

        catalog.clear_cache().await;
        check!(catalog.cached_len().await == 0);
    }

    #[tokio::test]
    async fn test_unknown_module() {
        let temp = site(&[]);
        let catalog = SiteCatalog::discover(temp.path()).await.unwrap();
        let_assert!(Err(SidebarError::ModuleNotFound(name)) = catalog.get(&ModulePath::parse("x::y")).await);
        check!(name == "x::y");
    }

    #[tokio::test]
    async fn test_cache_evicts_least_recently_used() {
        let temp = site(&[
            ("a/sidebar-items.js", "window.SIDEBAR_ITEMS = {};"),
            ("b/sidebar-items.js", "window.SIDEBAR_ITEMS = {};"),
        ]);
        let catalog = SiteCatalog::discover_with(temp.path(), ParseOptions::default(), 1)
            .await
            .unwrap();
        catalog.get(&ModulePath::parse("a")).await.unwrap();
        catalog.get(&ModulePath::parse("b")).await.unwrap();
        check!(catalog.cached_len().await == 1);
    }

    #[tokio::test]
    async fn test_check_collects_failures() {
        let temp = site(&[
            ("good/sidebar-items.js", "window.SIDEBAR_ITEMS = {};"),
            ("bad/sidebar-items.js", r#"window.SIDEBAR_ITEMS = {"fn":[["f"]]};"#),
        ]);
        let catalog = SiteCatalog::discover(temp.path()).await.unwrap();
        let report = catalog.check().await;
        check!(!report.is_ok());
        check!(report.loaded.len() == 1);
        let_assert!([(module, SidebarError::MalformedPair { .. })] = report.failures.as_slice());
        check!(module.to_string() == "bad");
    }
}
