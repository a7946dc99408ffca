//! Reference document model and property descriptors.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::Value;

/// PropertyGroup maps property names to their descriptors within one
/// named group of the reference document.
pub type PropertyGroup = BTreeMap<String, PropertyDescriptor>;

/// StyleReference is the declarative document enumerating valid paint and
/// layout properties for one schema version.
///
/// The wire form keys groups by name (`paint_fill`, `layout_line`, ...)
/// with the `paint`/`layout` lists naming the groups belonging to each
/// category. Per-category property lookups are indexed once before first
/// use, so this type should be considered immutable.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StyleReference {
    #[serde(default)]
    pub version: u32,

    /// Group names making up the layout category.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layout: Vec<String>,

    /// Group names making up the paint category.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paint: Vec<String>,

    #[serde(flatten)]
    pub groups: BTreeMap<String, PropertyGroup>,

    #[serde(skip)]
    paint_index: OnceCell<HashMap<String, PropertyDescriptor>>,

    #[serde(skip)]
    layout_index: OnceCell<HashMap<String, PropertyDescriptor>>,
}

impl Clone for StyleReference {
    fn clone(&self) -> Self {
        StyleReference {
            version: self.version,
            layout: self.layout.clone(),
            paint: self.paint.clone(),
            groups: self.groups.clone(),
            paint_index: OnceCell::new(),
            layout_index: OnceCell::new(),
        }
    }
}

/// PropertyCategory selects one of the two property tables of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyCategory {
    Layout,
    Paint,
}

/// PropertyDescriptor describes one paint or layout property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(rename = "type")]
    pub property_type: PropertyType,

    /// Whether the property may be a function, and of which behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<PropertyFunction>,

    /// Whether changes to the property animate.
    #[serde(default, skip_serializing_if = "is_false")]
    pub transition: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    /// Permitted values for enum-typed properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// PropertyType is the value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Color,
    Number,
    Boolean,
    String,
    Enum,
    Array,
}

/// PropertyFunction is the discreteness of a function-eligible property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyFunction {
    /// Output interpolates continuously between stops.
    Interpolated,
    /// Output steps at each stop.
    PiecewiseConstant,
}

/// ReferenceError reports a malformed reference document.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to parse reference document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{category} lists unknown group {group:?}")]
    UnknownGroup { category: String, group: String },
}

impl StyleReference {
    /// Parses a reference document from YAML.
    pub fn from_yaml(yaml: &str) -> Result<StyleReference, ReferenceError> {
        let reference: StyleReference = serde_yaml::from_str(yaml)?;
        for (category, names) in [("layout", &reference.layout), ("paint", &reference.paint)] {
            for name in names {
                if !reference.groups.contains_key(name) {
                    return Err(ReferenceError::UnknownGroup {
                        category: category.to_string(),
                        group: name.clone(),
                    });
                }
            }
        }
        Ok(reference)
    }

    /// Returns the descriptor for a paint property, if the reference
    /// knows it.
    pub fn paint_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.paint_index
            .get_or_init(|| self.build_index(&self.paint))
            .get(name)
    }

    /// Returns the descriptor for a layout property, if the reference
    /// knows it.
    pub fn layout_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.layout_index
            .get_or_init(|| self.build_index(&self.layout))
            .get(name)
    }

    /// Returns the descriptor for a property in the given category.
    pub fn property(&self, category: PropertyCategory, name: &str) -> Option<&PropertyDescriptor> {
        match category {
            PropertyCategory::Layout => self.layout_property(name),
            PropertyCategory::Paint => self.paint_property(name),
        }
    }

    /// Iterates property names of one category, grouped then sorted.
    pub fn property_names(&self, category: PropertyCategory) -> Vec<&str> {
        let groups = match category {
            PropertyCategory::Layout => &self.layout,
            PropertyCategory::Paint => &self.paint,
        };
        let mut names: Vec<&str> = groups
            .iter()
            .filter_map(|g| self.groups.get(g))
            .flat_map(|g| g.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn build_index(&self, group_names: &[String]) -> HashMap<String, PropertyDescriptor> {
        let mut index = HashMap::new();
        for name in group_names {
            if let Some(group) = self.groups.get(name) {
                for (property, descriptor) in group {
                    index.insert(property.clone(), descriptor.clone());
                }
            }
        }
        index
    }
}
