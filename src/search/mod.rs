//! Ranked item lookup across the sidebar indexes of a documentation tree.

pub(crate) mod scoring;

use crate::sidebar::SidebarIndex;
use crate::site::SiteCatalog;
use crate::types::{Category, ItemPair, ModulePath};
use scoring::{name_relevance, summary_relevance};

/// A single search match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub module: ModulePath,
    pub category: Category,
    pub item: ItemPair,
    pub relevance: u32,
}

impl SearchHit {
    /// Site-relative URL of the matched item's page.
    pub fn page_url(&self) -> Option<String> {
        self.module.page_url(&self.category, &self.item.name)
    }
}

/// Rank items of the given indexes against `query`, case-insensitively.
///
/// Higher relevance first; ties go to shallower modules, then to names in
/// byte order. Indexes without a module are reported under the root path.
pub fn search_indexes<'a, I>(indexes: I, query: &str, limit: usize) -> Vec<SearchHit>
where
    I: IntoIterator<Item = &'a SidebarIndex>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for index in indexes {
        let module = index.module().cloned().unwrap_or_default();
        for (category, items) in index {
            for item in items {
                let relevance = name_relevance(&item.name.to_lowercase(), &query)
                    .or_else(|| summary_relevance(&item.summary.to_lowercase(), &query));
                if let Some(relevance) = relevance {
                    hits.push(SearchHit {
                        module: module.clone(),
                        category: category.clone(),
                        item: item.clone(),
                        relevance,
                    });
                }
            }
        }
    }

    hits.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| a.module.depth().cmp(&b.module.depth()))
            .then_with(|| a.item.name.cmp(&b.item.name))
            .then_with(|| a.module.cmp(&b.module))
    });
    hits.truncate(limit);
    hits
}

/// Search every index of a catalog. Indexes that fail to load are skipped
/// with a warning.
pub async fn search(catalog: &SiteCatalog, query: &str, limit: usize) -> Vec<SearchHit> {
    let mut loaded = Vec::with_capacity(catalog.len());
    for module in catalog.modules() {
        match catalog.get(module).await {
            Ok(index) => loaded.push(index),
            Err(e) => tracing::warn!(module = %module, error = %e, "Skipping index in search"),
        }
    }

    let hits = search_indexes(loaded.iter().map(|index| &**index), query, limit);
    tracing::debug!(query, hits = hits.len(), "Search complete");
    hits
}
