//! Diff operations and their wire shape.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::style::{FilterExpression, LayerSpec, PropertyValue, SourceSpec, StyleDocument};
use crate::value::Map;

/// Operation is one minimal update transforming a previous style document
/// toward the next one.
///
/// Downstream appliers pattern-match on the serialized form, which is
/// bit-exact: `{"command": <name>, "args": [<positional arguments>]}`.
/// Absent positional values (a missing insert-before anchor, a removed
/// property) serialize as JSON null.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Full-document replace; the only operation emitted across schema
    /// version boundaries.
    SetStyle { style: StyleDocument },
    AddSource { id: String, source: SourceSpec },
    RemoveSource { id: String },
    /// `before` is the id of the layer to insert in front of; `None`
    /// appends at the end of paint order.
    AddLayer {
        layer: LayerSpec,
        before: Option<String>,
    },
    RemoveLayer { id: String },
    SetPaintProperty {
        layer: String,
        name: String,
        value: Option<PropertyValue>,
        class: Option<String>,
    },
    SetLayoutProperty {
        layer: String,
        name: String,
        value: Option<PropertyValue>,
        class: Option<String>,
    },
    SetFilter {
        layer: String,
        filter: Option<FilterExpression>,
    },
    /// Covers both bounds even when only one changed.
    SetLayerZoomRange {
        layer: String,
        minzoom: Option<f64>,
        maxzoom: Option<f64>,
    },
    SetLight { light: Option<Map> },
    SetCenter { center: Option<[f64; 2]> },
    SetZoom { zoom: Option<f64> },
    SetBearing { bearing: Option<f64> },
    SetPitch { pitch: Option<f64> },
}

impl Operation {
    /// Returns the wire command name.
    pub fn command(&self) -> &'static str {
        match self {
            Operation::SetStyle { .. } => "setStyle",
            Operation::AddSource { .. } => "addSource",
            Operation::RemoveSource { .. } => "removeSource",
            Operation::AddLayer { .. } => "addLayer",
            Operation::RemoveLayer { .. } => "removeLayer",
            Operation::SetPaintProperty { .. } => "setPaintProperty",
            Operation::SetLayoutProperty { .. } => "setLayoutProperty",
            Operation::SetFilter { .. } => "setFilter",
            Operation::SetLayerZoomRange { .. } => "setLayerZoomRange",
            Operation::SetLight { .. } => "setLight",
            Operation::SetCenter { .. } => "setCenter",
            Operation::SetZoom { .. } => "setZoom",
            Operation::SetBearing { .. } => "setBearing",
            Operation::SetPitch { .. } => "setPitch",
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("command", self.command())?;
        match self {
            Operation::SetStyle { style } => map.serialize_entry("args", &(style,))?,
            Operation::AddSource { id, source } => map.serialize_entry("args", &(id, source))?,
            Operation::RemoveSource { id } => map.serialize_entry("args", &(id,))?,
            Operation::AddLayer { layer, before } => {
                map.serialize_entry("args", &(layer, before))?
            }
            Operation::RemoveLayer { id } => map.serialize_entry("args", &(id,))?,
            Operation::SetPaintProperty {
                layer,
                name,
                value,
                class,
            }
            | Operation::SetLayoutProperty {
                layer,
                name,
                value,
                class,
            } => map.serialize_entry("args", &(layer, name, value, class))?,
            Operation::SetFilter { layer, filter } => {
                map.serialize_entry("args", &(layer, filter))?
            }
            Operation::SetLayerZoomRange {
                layer,
                minzoom,
                maxzoom,
            } => map.serialize_entry("args", &(layer, minzoom, maxzoom))?,
            Operation::SetLight { light } => map.serialize_entry("args", &(light,))?,
            Operation::SetCenter { center } => map.serialize_entry("args", &(center,))?,
            Operation::SetZoom { zoom } => map.serialize_entry("args", &(zoom,))?,
            Operation::SetBearing { bearing } => map.serialize_entry("args", &(bearing,))?,
            Operation::SetPitch { pitch } => map.serialize_entry("args", &(pitch,))?,
        }
        map.end()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str(self.command()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(op: &Operation) -> String {
        serde_json::to_string(op).unwrap()
    }

    #[test]
    fn test_remove_layer_wire_shape() {
        let op = Operation::RemoveLayer { id: "roads".into() };
        assert_eq!(wire(&op), r#"{"command":"removeLayer","args":["roads"]}"#);
    }

    #[test]
    fn test_add_layer_wire_shape() {
        let layer: LayerSpec = serde_json::from_str(r#"{"id": "a", "type": "fill"}"#).unwrap();
        let op = Operation::AddLayer {
            layer: layer.clone(),
            before: Some("b".into()),
        };
        assert_eq!(
            wire(&op),
            r#"{"command":"addLayer","args":[{"id":"a","type":"fill"},"b"]}"#
        );

        // A missing anchor serializes as null.
        let op = Operation::AddLayer {
            layer,
            before: None,
        };
        assert_eq!(
            wire(&op),
            r#"{"command":"addLayer","args":[{"id":"a","type":"fill"},null]}"#
        );
    }

    #[test]
    fn test_paint_property_wire_shape() {
        let op = Operation::SetPaintProperty {
            layer: "water".into(),
            name: "fill-color".into(),
            value: Some(PropertyValue::Constant(crate::value::Value::String(
                "#0000ff".into(),
            ))),
            class: None,
        };
        assert_eq!(
            wire(&op),
            r##"{"command":"setPaintProperty","args":["water","fill-color","#0000ff",null]}"##
        );

        let op = Operation::SetPaintProperty {
            layer: "water".into(),
            name: "fill-color".into(),
            value: None,
            class: Some("night".into()),
        };
        assert_eq!(
            wire(&op),
            r#"{"command":"setPaintProperty","args":["water","fill-color",null,"night"]}"#
        );
    }

    #[test]
    fn test_zoom_range_wire_shape() {
        let op = Operation::SetLayerZoomRange {
            layer: "roads".into(),
            minzoom: Some(4.0),
            maxzoom: None,
        };
        assert_eq!(
            wire(&op),
            r#"{"command":"setLayerZoomRange","args":["roads",4.0,null]}"#
        );
    }

    #[test]
    fn test_camera_wire_shapes() {
        assert_eq!(
            wire(&Operation::SetCenter {
                center: Some([1.0, 2.0])
            }),
            r#"{"command":"setCenter","args":[[1.0,2.0]]}"#
        );
        assert_eq!(
            wire(&Operation::SetZoom { zoom: Some(12.5) }),
            r#"{"command":"setZoom","args":[12.5]}"#
        );
        assert_eq!(
            wire(&Operation::SetBearing { bearing: Some(0.0) }),
            r#"{"command":"setBearing","args":[0.0]}"#
        );
        assert_eq!(
            wire(&Operation::SetPitch { pitch: Some(45.0) }),
            r#"{"command":"setPitch","args":[45.0]}"#
        );
    }

    #[test]
    fn test_command_names() {
        let op = Operation::SetFilter {
            layer: "roads".into(),
            filter: None,
        };
        assert_eq!(op.command(), "setFilter");
        assert_eq!(wire(&op), r#"{"command":"setFilter","args":["roads",null]}"#);
    }
}
