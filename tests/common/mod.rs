//! Shared test fixtures and utilities for integration tests.
//!
//! # Fixtures
//!
//! `tests/fixtures/` holds real rustdoc output for two modules:
//! `image::imageops` and `plotters::chart`.
//!
//! - `doc_site`: a fresh temp copy of the fixture tree, so tests may add or
//!   corrupt files without affecting each other
//! - `imageops` / `chart`: the two sample indexes, already parsed

use rstest::fixture;
use rustdoc_sidebar::sidebar::SIDEBAR_FILE_NAME;
use rustdoc_sidebar::{ModulePath, ParseOptions, SidebarIndex};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Returns the fixture documentation tree.
pub fn fixtures_root() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

pub const IMAGEOPS_FILE: &str = "image/imageops/sidebar-items.js";
pub const CHART_FILE: &str = "plotters/chart/sidebar-items.js";

/// Reads a fixture file verbatim.
pub fn read_fixture(relative: &str) -> String {
    let path = fixtures_root().join(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e))
}

/// A temporary documentation tree, removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempDocSite {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempDocSite {
    /// A tree holding copies of both fixture modules.
    pub fn with_fixtures() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let site = Self {
            root: temp.path().to_path_buf(),
            _temp: temp,
        };
        site.write_index("image::imageops", &read_fixture(IMAGEOPS_FILE));
        site.write_index("plotters::chart", &read_fixture(CHART_FILE));
        site
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `script` as the `sidebar-items.js` of `module` (a `::` path),
    /// replacing any index already there.
    pub fn write_index(&self, module: &str, script: &str) {
        let dir = module
            .split("::")
            .fold(self.root.clone(), |dir, segment| dir.join(segment));
        std::fs::create_dir_all(&dir).unwrap_or_else(|e| {
            panic!("Failed to create module directory for '{}': {}", module, e)
        });
        std::fs::write(dir.join(SIDEBAR_FILE_NAME), script)
            .unwrap_or_else(|e| panic!("Failed to write index of '{}': {}", module, e));
    }
}

/// Parse a fixture and tag it with its module path.
pub fn load_fixture(relative: &str, module: &str) -> SidebarIndex {
    SidebarIndex::load(fixtures_root().join(relative), &ParseOptions::default())
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}': {}", relative, e))
        .with_module(ModulePath::parse(module))
}

#[fixture]
pub fn doc_site() -> TempDocSite {
    rustdoc_sidebar::tracing::init(tracing::Level::DEBUG);
    TempDocSite::with_fixtures()
}

#[fixture]
pub fn imageops() -> SidebarIndex {
    load_fixture(IMAGEOPS_FILE, "image::imageops")
}

#[fixture]
pub fn chart() -> SidebarIndex {
    load_fixture(CHART_FILE, "plotters::chart")
}
