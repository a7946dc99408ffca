//! The style document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layer::LayerSpec;
use super::source::SourceSpec;
use crate::value::{Map, Value};

/// StyleDocument is the root object describing a map's sources, layers,
/// and camera defaults.
///
/// Layer order is paint order and is significant; everything else keyed by
/// name. Missing keys stay `None` and compare as absent. Unrecognized
/// top-level keys are tolerated: they round-trip through `extra` and are
/// never diffed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<Map>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: BTreeMap<String, SourceSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerSpec>,

    /// Legacy named-value table resolved during migration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<Map>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Map>,

    /// Opaque to diffing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(flatten)]
    pub extra: Map,
}

impl StyleDocument {
    /// Parses a style document from JSON.
    pub fn from_json(json: &str) -> Result<StyleDocument, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Finds a layer by id.
    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }
}
