//! Core value types shared by the parser, the catalog and the CLI.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

/// Item category label used as a key in a sidebar index.
///
/// The set of labels is generator-defined and not versioned, so unknown labels
/// are preserved verbatim in [`Category::Other`] instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Module,
    Macro,
    Struct,
    Enum,
    Union,
    Primitive,
    Trait,
    Function,
    TypeAlias,
    Static,
    Constant,
    Keyword,
    Attribute,
    Derive,
    TraitAlias,
    ForeignType,
    Other(String),
}

/// Every category label rustdoc is known to emit, in sidebar section order.
pub const KNOWN_CATEGORIES: &[Category] = &[
    Category::Module,
    Category::Macro,
    Category::Struct,
    Category::Enum,
    Category::Union,
    Category::Primitive,
    Category::Trait,
    Category::Function,
    Category::TypeAlias,
    Category::Static,
    Category::Constant,
    Category::Keyword,
    Category::Attribute,
    Category::Derive,
    Category::TraitAlias,
    Category::ForeignType,
];

impl Category {
    /// Map a raw label to a category. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label {
            "mod" => Self::Module,
            "macro" => Self::Macro,
            "struct" => Self::Struct,
            "enum" => Self::Enum,
            "union" => Self::Union,
            "primitive" => Self::Primitive,
            "trait" => Self::Trait,
            "fn" => Self::Function,
            "type" => Self::TypeAlias,
            "static" => Self::Static,
            "constant" => Self::Constant,
            "keyword" => Self::Keyword,
            "attr" => Self::Attribute,
            "derive" => Self::Derive,
            "traitalias" => Self::TraitAlias,
            "foreigntype" => Self::ForeignType,
            other => Self::Other(other.to_string()),
        }
    }

    /// The label as it appears in `sidebar-items.js`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Module => "mod",
            Self::Macro => "macro",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Primitive => "primitive",
            Self::Trait => "trait",
            Self::Function => "fn",
            Self::TypeAlias => "type",
            Self::Static => "static",
            Self::Constant => "constant",
            Self::Keyword => "keyword",
            Self::Attribute => "attr",
            Self::Derive => "derive",
            Self::TraitAlias => "traitalias",
            Self::ForeignType => "foreigntype",
            Self::Other(label) => label,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Relative link of an item page, as rustdoc lays pages out.
    ///
    /// Modules link to their own directory's `index.html`; every other known
    /// category links to `<label>.<name>.html`. Unknown categories have no
    /// derivable link.
    pub fn page_link(&self, name: &str) -> Option<String> {
        match self {
            Self::Module => Some(format!("{}/index.html", name)),
            Self::Other(_) => None,
            known => Some(format!("{}.{}.html", known.as_str(), name)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// One documented item: its name and its one-line summary.
///
/// The summary is pre-rendered text and may contain inline markup; it is
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemPair {
    pub name: String,
    pub summary: String,
}

impl ItemPair {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }
}

// Serialized as a two-element array, matching the on-disk `[name, summary]` form.
impl Serialize for ItemPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.summary)?;
        tuple.end()
    }
}

/// A `::`-separated module path such as `image::imageops`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    /// Parse a path like `image::imageops`. Empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split("::")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build a module path from a directory relative to the doc root.
    ///
    /// `image/imageops` becomes `image::imageops`. Returns `None` for paths
    /// that leave the doc root or are not valid UTF-8.
    pub fn from_relative_dir(dir: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in dir.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_str()?.to_string()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The crate this module belongs to (first segment).
    pub fn crate_name(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Site-relative URL of an item page, e.g. `image/imageops/fn.blur.html`.
    pub fn page_url(&self, category: &Category, name: &str) -> Option<String> {
        let link = category.page_link(name)?;
        if self.segments.is_empty() {
            Some(link)
        } else {
            Some(format!("{}/{}", self.segments.join("/"), link))
        }
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

impl FromStr for ModulePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
