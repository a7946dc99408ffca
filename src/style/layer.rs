//! Layer specifications.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter::FilterExpression;
use super::function::PropertyValue;
use crate::value::{Map, Value};

/// PropertyMap maps property names to their values within one paint or
/// layout block.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// LayerType is the closed set of rendering layer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerType {
    Fill,
    Line,
    Symbol,
    Circle,
    Raster,
    Background,
    FillExtrusion,
    Heatmap,
    Hillshade,
}

impl LayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Fill => "fill",
            LayerType::Line => "line",
            LayerType::Symbol => "symbol",
            LayerType::Circle => "circle",
            LayerType::Raster => "raster",
            LayerType::Background => "background",
            LayerType::FillExtrusion => "fill-extrusion",
            LayerType::Heatmap => "heatmap",
            LayerType::Hillshade => "hillshade",
        }
    }

    pub fn from_str(s: &str) -> Option<LayerType> {
        match s {
            "fill" => Some(LayerType::Fill),
            "line" => Some(LayerType::Line),
            "symbol" => Some(LayerType::Symbol),
            "circle" => Some(LayerType::Circle),
            "raster" => Some(LayerType::Raster),
            "background" => Some(LayerType::Background),
            "fill-extrusion" => Some(LayerType::FillExtrusion),
            "heatmap" => Some(LayerType::Heatmap),
            "hillshade" => Some(LayerType::Hillshade),
            _ => None,
        }
    }
}

/// LayerSpec is one ordered rendering unit of a style document.
///
/// `id` is the identity key within the document's layer list. Class-scoped
/// paint overlays appear on the wire as sibling `paint.<class>` keys, which
/// is why this type carries hand-written serde.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerSpec {
    pub id: String,
    pub layer_type: Option<LayerType>,
    /// Source referenced by id, absent for background layers.
    pub source: Option<String>,
    pub source_layer: Option<String>,
    /// Legacy: inherit source/type/filter/zoom-range from another layer.
    pub ref_layer: Option<String>,
    pub filter: Option<FilterExpression>,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub layout: PropertyMap,
    pub paint: PropertyMap,
    /// Class-scoped paint overlays, keyed by class name.
    pub paint_classes: BTreeMap<String, PropertyMap>,
    /// Legacy v7 flag, recognized so it round-trips in place.
    pub interactive: Option<bool>,
    /// Opaque to diffing.
    pub metadata: Option<Value>,
    /// Unrecognized keys, preserved verbatim and never diffed.
    pub extra: Map,
}

/// LayerError reports a layer object this model cannot represent.
#[derive(Debug, Clone, Error)]
pub enum LayerError {
    #[error("layer must be an object")]
    ExpectedObject,

    #[error("layer is missing its id")]
    MissingId,

    #[error("layer {id:?}: unknown layer type {layer_type:?}")]
    UnknownType { id: String, layer_type: String },

    #[error("layer {id:?}: {field} must be an object")]
    ExpectedPropertyObject { id: String, field: String },
}

impl LayerSpec {
    /// Interprets a JSON value as a layer.
    pub fn from_value(value: &Value) -> Result<LayerSpec, LayerError> {
        let map = value.as_map().ok_or(LayerError::ExpectedObject)?;
        let id = map
            .get("id")
            .and_then(Value::as_str)
            .ok_or(LayerError::MissingId)?
            .to_string();

        let mut layer = LayerSpec {
            id: id.clone(),
            ..Default::default()
        };

        for (key, value) in map.iter() {
            match key.as_str() {
                "id" => {}
                "type" => {
                    let name = value.as_str().unwrap_or_default();
                    layer.layer_type =
                        Some(LayerType::from_str(name).ok_or_else(|| LayerError::UnknownType {
                            id: id.clone(),
                            layer_type: name.to_string(),
                        })?);
                }
                "source" => layer.source = value.as_str().map(String::from),
                "source-layer" => layer.source_layer = value.as_str().map(String::from),
                "ref" => layer.ref_layer = value.as_str().map(String::from),
                "filter" => layer.filter = Some(FilterExpression::from_value(value)),
                "minzoom" => layer.minzoom = value.as_number(),
                "maxzoom" => layer.maxzoom = value.as_number(),
                "layout" => layer.layout = property_map(&id, "layout", value)?,
                "paint" => layer.paint = property_map(&id, "paint", value)?,
                "interactive" => layer.interactive = value.as_bool(),
                "metadata" => layer.metadata = Some(value.clone()),
                _ => {
                    if let Some(class) = key.strip_prefix("paint.") {
                        layer
                            .paint_classes
                            .insert(class.to_string(), property_map(&id, key, value)?);
                    } else {
                        layer.extra.set(key.clone(), value.clone());
                    }
                }
            }
        }

        Ok(layer)
    }

    /// Renders the layer back to its JSON object form.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.set("id".into(), Value::String(self.id.clone()));
        if let Some(layer_type) = self.layer_type {
            map.set("type".into(), Value::String(layer_type.as_str().into()));
        }
        if let Some(ref source) = self.source {
            map.set("source".into(), Value::String(source.clone()));
        }
        if let Some(ref source_layer) = self.source_layer {
            map.set("source-layer".into(), Value::String(source_layer.clone()));
        }
        if let Some(ref target) = self.ref_layer {
            map.set("ref".into(), Value::String(target.clone()));
        }
        if let Some(ref filter) = self.filter {
            map.set("filter".into(), filter.to_value());
        }
        if let Some(minzoom) = self.minzoom {
            map.set("minzoom".into(), Value::Float(minzoom));
        }
        if let Some(maxzoom) = self.maxzoom {
            map.set("maxzoom".into(), Value::Float(maxzoom));
        }
        if !self.layout.is_empty() {
            map.set("layout".into(), property_map_value(&self.layout));
        }
        if !self.paint.is_empty() {
            map.set("paint".into(), property_map_value(&self.paint));
        }
        for (class, overlay) in &self.paint_classes {
            map.set(format!("paint.{}", class), property_map_value(overlay));
        }
        if let Some(interactive) = self.interactive {
            map.set("interactive".into(), Value::Bool(interactive));
        }
        if let Some(ref metadata) = self.metadata {
            map.set("metadata".into(), metadata.clone());
        }
        for (key, value) in self.extra.iter() {
            map.set(key.clone(), value.clone());
        }
        Value::Map(map)
    }

    /// Equality over the fields diffing actually compares.
    ///
    /// `metadata` and unrecognized keys are excluded at both document and
    /// layer level.
    pub fn same_ignoring_metadata(&self, other: &LayerSpec) -> bool {
        self.layer_type == other.layer_type
            && self.source == other.source
            && self.source_layer == other.source_layer
            && self.ref_layer == other.ref_layer
            && self.filter == other.filter
            && self.minzoom == other.minzoom
            && self.maxzoom == other.maxzoom
            && self.layout == other.layout
            && self.paint == other.paint
            && self.paint_classes == other.paint_classes
    }
}

fn property_map(id: &str, field: &str, value: &Value) -> Result<PropertyMap, LayerError> {
    let map = value.as_map().ok_or_else(|| LayerError::ExpectedPropertyObject {
        id: id.to_string(),
        field: field.to_string(),
    })?;
    Ok(map
        .iter()
        .map(|(name, value)| (name.clone(), PropertyValue::from_value(value)))
        .collect())
}

fn property_map_value(properties: &PropertyMap) -> Value {
    let mut map = Map::new();
    for (name, value) in properties {
        map.set(name.clone(), value.to_value());
    }
    Value::Map(map)
}

impl Serialize for LayerSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LayerSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        LayerSpec::from_value(&value).map_err(de::Error::custom)
    }
}
