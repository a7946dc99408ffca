//! Property values and property functions.

use crate::value::{Map, Value};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// PropertyValue is the value of a single paint or layout property.
///
/// A property holds either a constant JSON value or a property function
/// interpolating outputs over an input domain (zoom or data).
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Constant(Value),
    Function(FunctionSpec),
}

/// FunctionSpec is a property function in either of its two wire forms.
///
/// The legacy form pairs inputs with outputs as `stops`; the migrated form
/// carries an explicit kind plus separate `domain` and `range` lists.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionSpec {
    Stops {
        stops: Vec<(Value, Value)>,
        base: Option<f64>,
    },
    Piecewise {
        kind: FunctionKind,
        domain: Vec<Value>,
        range: Vec<Value>,
        base: Option<f64>,
    },
}

/// FunctionKind distinguishes stepwise from interpolated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Stepwise output: N domain breakpoints partition into N+1 ranges.
    Interval,
    /// Continuous output interpolated between domain breakpoints.
    Exponential,
}

impl FunctionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::Interval => "interval",
            FunctionKind::Exponential => "exponential",
        }
    }

    pub fn from_str(s: &str) -> Option<FunctionKind> {
        match s {
            "interval" => Some(FunctionKind::Interval),
            "exponential" => Some(FunctionKind::Exponential),
            _ => None,
        }
    }
}

impl PropertyValue {
    /// Interprets a JSON value as a property value.
    ///
    /// An object carrying a `stops` key, or both `domain` and `range` keys,
    /// is a function; anything else is a constant. Objects that look almost
    /// like functions but are malformed stay constants rather than failing.
    pub fn from_value(value: &Value) -> PropertyValue {
        if let Value::Map(map) = value {
            if map.has("stops") {
                if let Some(stops) = parse_stops(map.get("stops")) {
                    return PropertyValue::Function(FunctionSpec::Stops {
                        stops,
                        base: map.get("base").and_then(Value::as_number),
                    });
                }
            } else if map.has("domain") && map.has("range") {
                if let (Some(domain), Some(range)) = (
                    map.get("domain").and_then(Value::as_list),
                    map.get("range").and_then(Value::as_list),
                ) {
                    let kind = map
                        .get("type")
                        .and_then(Value::as_str)
                        .and_then(FunctionKind::from_str)
                        .unwrap_or(FunctionKind::Exponential);
                    return PropertyValue::Function(FunctionSpec::Piecewise {
                        kind,
                        domain: domain.clone(),
                        range: range.clone(),
                        base: map.get("base").and_then(Value::as_number),
                    });
                }
            }
        }
        PropertyValue::Constant(value.clone())
    }

    /// Renders the property value back to its JSON form.
    pub fn to_value(&self) -> Value {
        match self {
            PropertyValue::Constant(v) => v.clone(),
            PropertyValue::Function(f) => f.to_value(),
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, PropertyValue::Function(_))
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            PropertyValue::Constant(v) => Some(v),
            _ => None,
        }
    }
}

impl FunctionSpec {
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        match self {
            FunctionSpec::Stops { stops, base } => {
                let stops: Vec<Value> = stops
                    .iter()
                    .map(|(input, output)| Value::List(vec![input.clone(), output.clone()]))
                    .collect();
                map.set("stops".into(), Value::List(stops));
                if let Some(base) = base {
                    map.set("base".into(), Value::Float(*base));
                }
            }
            FunctionSpec::Piecewise {
                kind,
                domain,
                range,
                base,
            } => {
                map.set("type".into(), Value::String(kind.as_str().into()));
                map.set("domain".into(), Value::List(domain.clone()));
                map.set("range".into(), Value::List(range.clone()));
                if let Some(base) = base {
                    map.set("base".into(), Value::Float(*base));
                }
            }
        }
        Value::Map(map)
    }
}

fn parse_stops(value: Option<&Value>) -> Option<Vec<(Value, Value)>> {
    let items = value?.as_list()?;
    let mut stops = Vec::with_capacity(items.len());
    for item in items {
        let pair = item.as_list()?;
        if pair.len() != 2 {
            return None;
        }
        stops.push((pair[0].clone(), pair[1].clone()));
    }
    Some(stops)
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(PropertyValue::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;

    #[test]
    fn test_constant_values() {
        let color = PropertyValue::from_value(&Value::String("#ff0000".into()));
        assert!(!color.is_function());
        assert_eq!(color.as_constant(), Some(&Value::String("#ff0000".into())));

        // Arrays are constants too (e.g. translate offsets).
        let offset = PropertyValue::from_value(&from_json("[1, 2]").unwrap());
        assert!(!offset.is_function());
    }

    #[test]
    fn test_stops_function_parses() {
        let raw = from_json(r#"{"stops": [[0, "red"], [10, "blue"]], "base": 1.5}"#).unwrap();
        let value = PropertyValue::from_value(&raw);
        match &value {
            PropertyValue::Function(FunctionSpec::Stops { stops, base }) => {
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[0].0, Value::Int(0));
                assert_eq!(stops[1].1, Value::String("blue".into()));
                assert_eq!(*base, Some(1.5));
            }
            other => panic!("expected stops function, got {:?}", other),
        }
        assert_eq!(value.to_value(), raw);
    }

    #[test]
    fn test_piecewise_function_parses() {
        let raw =
            from_json(r#"{"type": "interval", "domain": [10], "range": ["a", "b"]}"#).unwrap();
        let value = PropertyValue::from_value(&raw);
        match &value {
            PropertyValue::Function(FunctionSpec::Piecewise {
                kind,
                domain,
                range,
                base,
            }) => {
                assert_eq!(*kind, FunctionKind::Interval);
                assert_eq!(domain.len(), 1);
                assert_eq!(range.len(), 2);
                assert!(base.is_none());
            }
            other => panic!("expected piecewise function, got {:?}", other),
        }
        assert_eq!(value.to_value(), raw);
    }

    #[test]
    fn test_malformed_stops_stay_constant() {
        let raw = from_json(r#"{"stops": [[0, "red", "extra"]]}"#).unwrap();
        let value = PropertyValue::from_value(&raw);
        assert!(!value.is_function());
        assert_eq!(value.to_value(), raw);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = r#"{"stops":[[0,1],[10,2]]}"#;
        let value: PropertyValue = serde_json::from_str(json).unwrap();
        assert!(value.is_function());
        assert_eq!(serde_json::to_string(&value).unwrap(), json);
    }
}
