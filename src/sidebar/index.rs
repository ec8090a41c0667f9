//! Parsed, validated sidebar index of a single documented module.

use super::script::{self, EnvelopeForm, ParseOptions};
use crate::error::SidebarError;
use crate::types::{Category, ItemPair, ModulePath};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Categorized listing of one module's public items.
///
/// Categories and the items inside them keep the order the generator wrote
/// them in. An index is immutable once built: a changed module is loaded again
/// from scratch.
#[derive(Debug, Clone, Default)]
pub struct SidebarIndex {
    module: Option<ModulePath>,
    form: EnvelopeForm,
    entries: Vec<(Category, Vec<ItemPair>)>,
}

impl PartialEq for SidebarIndex {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module && self.entries == other.entries
    }
}

impl Eq for SidebarIndex {}

impl SidebarIndex {
    /// Parse the text of a `sidebar-items.js` file with default options.
    pub fn parse(text: &str) -> Result<Self, SidebarError> {
        Self::parse_with(text, &ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self, SidebarError> {
        let (form, raw): (EnvelopeForm, RawPayload) = script::extract(text, options)?;
        let entries = validate(raw, options)?;
        Ok(Self {
            module: None,
            form,
            entries,
        })
    }

    /// Read and parse an index file.
    pub fn load<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self, SidebarError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SidebarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with(&text, options)
    }

    /// Read and parse an index file without blocking the runtime.
    pub async fn load_async<P: AsRef<Path>>(
        path: P,
        options: &ParseOptions,
    ) -> Result<Self, SidebarError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SidebarError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse_with(&text, options)
    }

    /// Attach the module this index documents.
    #[must_use]
    pub fn with_module(mut self, module: ModulePath) -> Self {
        self.module = Some(module);
        self
    }

    pub const fn module(&self) -> Option<&ModulePath> {
        self.module.as_ref()
    }

    pub const fn form(&self) -> &EnvelopeForm {
        &self.form
    }

    /// Items of a category. Absent categories yield an empty slice.
    pub fn get(&self, category: &Category) -> &[ItemPair] {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, items)| items.as_slice())
            .unwrap_or_default()
    }

    /// Items of a category given by its raw label.
    pub fn get_str(&self, label: &str) -> &[ItemPair] {
        self.get(&Category::from_label(label))
    }

    /// Look up one item by category and name.
    pub fn item(&self, category: &Category, name: &str) -> Option<&ItemPair> {
        self.get(category).iter().find(|pair| pair.name == name)
    }

    /// Categories present, in file order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|(c, _)| c)
    }

    /// `(category, items)` groups, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &[ItemPair])> {
        self.entries.iter().map(|(c, items)| (c, items.as_slice()))
    }

    /// Total number of items across every category.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Page link of an item relative to this module's directory.
    ///
    /// Returns `None` when the item is not listed or its category has no
    /// known page layout.
    pub fn link_for(&self, category: &Category, name: &str) -> Option<String> {
        self.item(category, name)?;
        category.page_link(name)
    }

    /// Serialize back into the statement the index was read from.
    pub fn to_script(&self) -> Result<String, SidebarError> {
        let payload = serde_json::to_string(self)?;
        Ok(self.form.wrap(&payload))
    }
}

impl<'a> IntoIterator for &'a SidebarIndex {
    type Item = (&'a Category, &'a [ItemPair]);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

// Serialized as the JSON object inside the envelope, keys in file order.
impl Serialize for SidebarIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, items) in &self.entries {
            map.serialize_entry(category.as_str(), items)?;
        }
        map.end()
    }
}

/// Payload object with its keys in document order.
///
/// `serde_json::Map` sorts keys unless `preserve_order` is enabled, so the
/// object is read through a visitor instead.
#[derive(Debug, Default)]
struct RawPayload(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for RawPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = RawPayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping categories to item lists")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(RawPayload(entries))
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}

fn validate(
    raw: RawPayload,
    options: &ParseOptions,
) -> Result<Vec<(Category, Vec<ItemPair>)>, SidebarError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw.0.len());

    for (label, value) in raw.0 {
        if !seen.insert(label.clone()) {
            return Err(SidebarError::DuplicateCategory(label));
        }

        let category = Category::from_label(&label);
        if !category.is_known() && options.strict_categories {
            return Err(SidebarError::UnknownCategory(label));
        }

        match validate_items(&label, value) {
            Ok(items) => entries.push((category, items)),
            Err(err) if !category.is_known() => {
                // Newer generators may use unknown keys for other shapes of data.
                tracing::warn!(category = %label, error = %err, "Skipping unrecognized sidebar category");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(entries)
}

fn validate_items(category: &str, value: Value) -> Result<Vec<ItemPair>, SidebarError> {
    let malformed = |index: usize, reason: &str| SidebarError::MalformedPair {
        category: category.to_string(),
        index,
        reason: reason.to_string(),
    };

    let Value::Array(raw_items) = value else {
        return Err(malformed(0, "category value is not a list"));
    };

    let mut names = HashSet::with_capacity(raw_items.len());
    let mut items = Vec::with_capacity(raw_items.len());

    for (index, raw) in raw_items.into_iter().enumerate() {
        let Value::Array(parts) = raw else {
            return Err(malformed(index, "item is not a [name, summary] pair"));
        };
        let [name, summary]: [Value; 2] = parts
            .try_into()
            .map_err(|parts: Vec<Value>| {
                malformed(index, &format!("expected 2 elements, found {}", parts.len()))
            })?;
        let Value::String(name) = name else {
            return Err(malformed(index, "item name is not a string"));
        };
        let Value::String(summary) = summary else {
            return Err(malformed(index, "item summary is not a string"));
        };

        if !names.insert(name.clone()) {
            return Err(SidebarError::DuplicateItem {
                category: category.to_string(),
                name,
            });
        }
        items.push(ItemPair { name, summary });
    }

    Ok(items)
}
