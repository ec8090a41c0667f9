//! Non-fatal checks on a parsed index, reported to the operator of a doc build.

use super::index::SidebarIndex;
use crate::types::Category;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(r#)?[\p{XID_Start}_]\p{XID_Continue}*$").expect("identifier pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintKind {
    /// The item name is not a Rust identifier.
    NonIdentifierName,
    /// The summary is empty or only whitespace.
    EmptySummary,
    /// The summary spans several lines.
    MultiLineSummary,
    /// The category label is not one rustdoc is known to emit.
    UnknownCategory,
    /// Item names of the category are not in case-insensitive order.
    UnsortedItems,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    pub kind: LintKind,
    pub category: Category,
    /// Offending item, `None` for category-level findings.
    pub name: Option<String>,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            LintKind::NonIdentifierName => "name is not a Rust identifier",
            LintKind::EmptySummary => "summary is empty",
            LintKind::MultiLineSummary => "summary spans multiple lines",
            LintKind::UnknownCategory => "category is not a known rustdoc category",
            LintKind::UnsortedItems => "items are not in alphabetical order",
        };
        match &self.name {
            Some(name) => write!(f, "{} `{}`: {}", self.category, name, what),
            None => write!(f, "{}: {}", self.category, what),
        }
    }
}

/// Collect lint findings for an index, in file order.
pub fn lint(index: &SidebarIndex) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    for (category, items) in index {
        if !category.is_known() {
            findings.push(LintFinding {
                kind: LintKind::UnknownCategory,
                category: category.clone(),
                name: None,
            });
        }
        if !items.is_sorted_by_key(|item| item.name.to_lowercase()) {
            findings.push(LintFinding {
                kind: LintKind::UnsortedItems,
                category: category.clone(),
                name: None,
            });
        }

        for item in items {
            let mut push = |kind| {
                findings.push(LintFinding {
                    kind,
                    category: category.clone(),
                    name: Some(item.name.clone()),
                });
            };

            if !IDENTIFIER.is_match(&item.name) {
                push(LintKind::NonIdentifierName);
            }
            if item.summary.trim().is_empty() {
                push(LintKind::EmptySummary);
            } else if item.summary.contains('\n') {
                push(LintKind::MultiLineSummary);
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_clean_index_has_no_findings() {
        let index = SidebarIndex::parse(
            r#"window.SIDEBAR_ITEMS = {"fn":[["größe","Size."],["r#try","Try."],["rotate180","Rotate."],["rotate90","Rotate."]],"struct":[["ChartState","C."],["dual","D."],["MeshStyle","M."]]};"#,
        )
        .unwrap();
        check!(lint(&index).is_empty());
    }

    #[test]
    fn test_findings() {
        let index = SidebarIndex::parse(
            r#"window.SIDEBAR_ITEMS = {"fn":[["bad name","x"],["quiet",""],["wordy","one\ntwo"]],"opaque":[]};"#,
        )
        .unwrap();
        let kinds: Vec<_> = lint(&index).into_iter().map(|f| f.kind).collect();
        check!(
            kinds
                == vec![
                    LintKind::NonIdentifierName,
                    LintKind::EmptySummary,
                    LintKind::MultiLineSummary,
                    LintKind::UnknownCategory,
                ]
        );
    }

    #[test]
    fn test_unsorted_category_reported_once() {
        let index = SidebarIndex::parse(
            r#"window.SIDEBAR_ITEMS = {"fn":[["zeta","Z."],["alpha","A."],["beta","B."]],"enum":[["A","A."]]};"#,
        )
        .unwrap();
        let findings = lint(&index);
        check!(
            findings
                == [LintFinding {
                    kind: LintKind::UnsortedItems,
                    category: Category::Function,
                    name: None,
                }]
        );
        check!(findings[0].to_string() == "fn: items are not in alphabetical order");
    }

    #[test]
    fn test_non_identifier_names() {
        let index = SidebarIndex::parse(
            r#"window.SIDEBAR_ITEMS = {"fn":[["1st","x"],["a-b","x"],["r#","x"]]};"#,
        )
        .unwrap();
        let kinds: Vec<_> = lint(&index).into_iter().map(|f| f.kind).collect();
        check!(kinds == [LintKind::NonIdentifierName; 3]);
    }

    #[test]
    fn test_finding_display() {
        let finding = LintFinding {
            kind: LintKind::EmptySummary,
            category: Category::Function,
            name: Some("quiet".to_string()),
        };
        check!(finding.to_string() == "fn `quiet`: summary is empty");
    }
}
