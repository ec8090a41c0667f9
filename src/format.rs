//! Plain-text rendering of indexes, lint findings and search hits.

use crate::search::SearchHit;
use crate::sidebar::{LintFinding, SidebarIndex};
use crate::types::{Category, ItemPair};
use std::fmt::{self, Write as _};

/// Render an index, optionally restricted to one category.
///
/// ```text
/// image::imageops
///   enum (1)
///     FilterType  Available Sampling Filters.
/// ```
pub fn render_index(
    output: &mut String,
    index: &SidebarIndex,
    only: Option<&Category>,
) -> fmt::Result {
    match index.module() {
        Some(module) => writeln!(output, "{}", module)?,
        None => writeln!(output, "<unnamed module>")?,
    }

    match only {
        Some(category) => render_category(output, category, index.get(category))?,
        None if index.is_empty() => writeln!(output, "  (no items)")?,
        None => {
            for (category, items) in index {
                render_category(output, category, items)?;
            }
        }
    }
    Ok(())
}

fn render_category(output: &mut String, category: &Category, items: &[ItemPair]) -> fmt::Result {
    writeln!(output, "  {} ({})", category, items.len())?;
    let width = items.iter().map(|item| item.name.len()).max().unwrap_or(0);
    for item in items {
        if item.summary.is_empty() {
            writeln!(output, "    {}", item.name)?;
        } else {
            writeln!(output, "    {:<width$}  {}", item.name, item.summary, width = width)?;
        }
    }
    Ok(())
}

/// Render lint findings for one index.
pub fn render_findings(
    output: &mut String,
    index: &SidebarIndex,
    findings: &[LintFinding],
) -> fmt::Result {
    let module = index
        .module()
        .map_or_else(|| "<unnamed module>".to_string(), ToString::to_string);
    for finding in findings {
        writeln!(output, "warning: {}: {}", module, finding)?;
    }
    Ok(())
}

/// Render ranked search hits, one per line.
pub fn render_hits(output: &mut String, query: &str, hits: &[SearchHit]) -> fmt::Result {
    if hits.is_empty() {
        return writeln!(output, "No results found for '{}'", query);
    }

    writeln!(output, "Results for '{}' ({}):", query, hits.len())?;
    for hit in hits {
        let path = if hit.module.is_root() {
            hit.item.name.clone()
        } else {
            format!("{}::{}", hit.module, hit.item.name)
        };
        write!(output, "  {} {}", hit.category, path)?;
        if let Some(url) = hit.page_url() {
            write!(output, "  [{}]", url)?;
        }
        writeln!(output)?;
        if !hit.item.summary.is_empty() {
            writeln!(output, "      {}", hit.item.summary)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search_indexes;
    use crate::types::ModulePath;
    use assert2::check;

    fn ops() -> SidebarIndex {
        SidebarIndex::parse(
            r#"window.SIDEBAR_ITEMS = {"enum":[["FilterType","Available Sampling Filters."]],"fn":[["blur","Blur."],["crop_imm",""]]};"#,
        )
        .unwrap()
        .with_module(ModulePath::parse("image::imageops"))
    }

    #[test]
    fn test_render_whole_index() {
        let mut output = String::new();
        render_index(&mut output, &ops(), None).unwrap();
        check!(
            output
                == "image::imageops\n  enum (1)\n    FilterType  Available Sampling Filters.\n  fn (2)\n    blur      Blur.\n    crop_imm\n"
        );
    }

    #[test]
    fn test_render_absent_category() {
        let mut output = String::new();
        render_index(&mut output, &ops(), Some(&Category::Trait)).unwrap();
        check!(output == "image::imageops\n  trait (0)\n");
    }

    #[test]
    fn test_render_hits() {
        let index = ops();
        let hits = search_indexes([&index], "blur", 5);
        let mut output = String::new();
        render_hits(&mut output, "blur", &hits).unwrap();
        check!(output.contains("fn image::imageops::blur  [image/imageops/fn.blur.html]"));

        let mut empty = String::new();
        render_hits(&mut empty, "zzz", &[]).unwrap();
        check!(empty == "No results found for 'zzz'\n");
    }
}
