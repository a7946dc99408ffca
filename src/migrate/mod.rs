//! Migrate module - One version step of the style migration chain.
//!
//! Rewrites `stops`-based property functions into the explicit
//! `type`/`domain`/`range` form and resolves sigil constant references.
//! Chained externally once per version increment; the diff engine only
//! ever receives same-version documents.

use thiserror::Error;

use crate::reference::{PropertyCategory, PropertyFunction, StyleReference};
use crate::style::{FunctionKind, FunctionSpec, PropertyMap, PropertyValue, StyleDocument};
use crate::value::{Map, Value};

/// Constant references are strings starting with this sigil, looked up
/// verbatim (sigil included) in the document's constants table.
const CONSTANT_SIGIL: char = '@';

/// MigrateError reports an unresolvable document.
#[derive(Debug, Clone, Error)]
pub enum MigrateError {
    #[error("unknown constant reference: {name}")]
    UnknownConstant { name: String },
}

/// Migrates a style document one schema version forward.
///
/// The reference supplies per-property discreteness metadata: properties
/// marked piecewise-constant become `interval` functions (dropping the
/// first stop's input, since N breakpoints partition into N+1 ranges, and
/// any interpolation base); everything else becomes `exponential` with the
/// full domain and its base kept. Properties the reference does not know
/// default to `exponential`.
///
/// Returns a new document with `version` bumped; the input is untouched.
pub fn migrate(
    style: &StyleDocument,
    reference: &StyleReference,
) -> Result<StyleDocument, MigrateError> {
    let mut next = style.clone();
    next.version = style.version.map(|v| v + 1);

    let constants = style.constants.clone().unwrap_or_default();

    for layer in &mut next.layers {
        migrate_properties(
            &mut layer.layout,
            PropertyCategory::Layout,
            reference,
            &constants,
        )?;
        migrate_properties(
            &mut layer.paint,
            PropertyCategory::Paint,
            reference,
            &constants,
        )?;
        for overlay in layer.paint_classes.values_mut() {
            migrate_properties(overlay, PropertyCategory::Paint, reference, &constants)?;
        }
    }

    Ok(next)
}

fn migrate_properties(
    properties: &mut PropertyMap,
    category: PropertyCategory,
    reference: &StyleReference,
    constants: &Map,
) -> Result<(), MigrateError> {
    for (name, value) in properties.iter_mut() {
        resolve_constants(value, constants)?;

        if let PropertyValue::Function(FunctionSpec::Stops { stops, base }) = value {
            let discrete = matches!(
                reference.property(category, name).and_then(|d| d.function),
                Some(PropertyFunction::PiecewiseConstant)
            );
            let kind = if discrete {
                FunctionKind::Interval
            } else {
                FunctionKind::Exponential
            };
            let skip = usize::from(discrete);
            let domain: Vec<Value> = stops
                .iter()
                .skip(skip)
                .map(|(input, _)| input.clone())
                .collect();
            let range: Vec<Value> = stops.iter().map(|(_, output)| output.clone()).collect();
            let base = if discrete { None } else { *base };
            *value = PropertyValue::Function(FunctionSpec::Piecewise {
                kind,
                domain,
                range,
                base,
            });
        }
    }
    Ok(())
}

/// Replaces sigil references in a property value: the value itself, or the
/// outputs of its stops (a constant may in turn hold a whole function).
fn resolve_constants(value: &mut PropertyValue, constants: &Map) -> Result<(), MigrateError> {
    match value {
        PropertyValue::Constant(Value::String(s)) if s.starts_with(CONSTANT_SIGIL) => {
            let resolved = constants
                .get(s)
                .ok_or_else(|| MigrateError::UnknownConstant { name: s.clone() })?;
            *value = PropertyValue::from_value(resolved);
        }
        PropertyValue::Function(FunctionSpec::Stops { stops, .. }) => {
            for (_, output) in stops.iter_mut() {
                if let Value::String(s) = output {
                    if s.starts_with(CONSTANT_SIGIL) {
                        let resolved = constants
                            .get(s)
                            .ok_or_else(|| MigrateError::UnknownConstant { name: s.clone() })?;
                        *output = resolved.clone();
                    }
                }
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reference;
    use crate::value::from_json;

    fn doc(json: &str) -> StyleDocument {
        StyleDocument::from_json(json).unwrap()
    }

    #[test]
    fn test_interpolated_stops_become_exponential() {
        let style = doc(
            r#"{"version": 7, "layers": [{"id": "a", "type": "line",
                "paint": {"line-width": {"stops": [[0, 1], [10, 4]], "base": 1.5}}}]}"#,
        );
        let migrated = migrate(&style, reference::latest()).unwrap();

        assert_eq!(migrated.version, Some(8));
        assert_eq!(
            migrated.layers[0].paint.get("line-width").unwrap(),
            &PropertyValue::Function(FunctionSpec::Piecewise {
                kind: FunctionKind::Exponential,
                domain: vec![Value::Int(0), Value::Int(10)],
                range: vec![Value::Int(1), Value::Int(4)],
                base: Some(1.5),
            })
        );
        // The input document is untouched.
        assert_eq!(style.version, Some(7));
        assert!(matches!(
            style.layers[0].paint.get("line-width").unwrap(),
            PropertyValue::Function(FunctionSpec::Stops { .. })
        ));
    }

    #[test]
    fn test_piecewise_constant_stops_become_interval() {
        let style = doc(
            r#"{"version": 7, "layers": [{"id": "a", "type": "line",
                "layout": {"line-cap": {"stops": [[0, "butt"], [11, "round"]], "base": 2}}}]}"#,
        );
        let migrated = migrate(&style, reference::latest()).unwrap();

        // One breakpoint partitions the zoom axis into two ranges, and the
        // interpolation base has no meaning for stepwise output.
        assert_eq!(
            migrated.layers[0].layout.get("line-cap").unwrap(),
            &PropertyValue::Function(FunctionSpec::Piecewise {
                kind: FunctionKind::Interval,
                domain: vec![Value::Int(11)],
                range: vec![Value::String("butt".into()), Value::String("round".into())],
                base: None,
            })
        );
    }

    #[test]
    fn test_unknown_property_defaults_to_exponential() {
        let style = doc(
            r#"{"version": 7, "layers": [{"id": "a", "type": "line",
                "paint": {"line-sparkle": {"stops": [[0, 1]]}}}]}"#,
        );
        let migrated = migrate(&style, reference::latest()).unwrap();
        assert!(matches!(
            migrated.layers[0].paint.get("line-sparkle").unwrap(),
            PropertyValue::Function(FunctionSpec::Piecewise {
                kind: FunctionKind::Exponential,
                ..
            })
        ));
    }

    #[test]
    fn test_constants_resolve_before_migrating() {
        let style = doc(
            r##"{
                "version": 7,
                "constants": {
                    "@water": "#0000ff",
                    "@widths": {"stops": [[0, 1], [10, 4]]}
                },
                "layers": [{"id": "a", "type": "line",
                    "paint": {"line-color": "@water", "line-width": "@widths"}}]
            }"##,
        );
        let migrated = migrate(&style, reference::latest()).unwrap();

        assert_eq!(
            migrated.layers[0].paint.get("line-color").unwrap(),
            &PropertyValue::Constant(Value::String("#0000ff".into()))
        );
        // A constant holding a function migrates like any other function.
        assert!(matches!(
            migrated.layers[0].paint.get("line-width").unwrap(),
            PropertyValue::Function(FunctionSpec::Piecewise { .. })
        ));
    }

    #[test]
    fn test_constants_resolve_inside_stop_outputs() {
        let style = doc(
            r##"{
                "version": 7,
                "constants": {"@land": "#f8f4f0"},
                "layers": [{"id": "a", "type": "fill",
                    "paint": {"fill-color": {"stops": [[0, "@land"], [10, "#ffffff"]]}}}]
            }"##,
        );
        let migrated = migrate(&style, reference::latest()).unwrap();
        match migrated.layers[0].paint.get("fill-color").unwrap() {
            PropertyValue::Function(FunctionSpec::Piecewise { range, .. }) => {
                assert_eq!(range[0], Value::String("#f8f4f0".into()));
            }
            other => panic!("expected piecewise function, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_constant_is_an_error() {
        let style = doc(
            r#"{"version": 7, "layers": [{"id": "a", "type": "line",
                "paint": {"line-color": "@missing"}}]}"#,
        );
        let err = migrate(&style, reference::latest()).unwrap_err();
        assert!(matches!(err, MigrateError::UnknownConstant { ref name } if name == "@missing"));
    }

    #[test]
    fn test_paint_class_overlays_migrate_too() {
        let style = doc(
            r#"{"version": 7, "layers": [{"id": "a", "type": "line",
                "paint.night": {"line-width": {"stops": [[0, 2], [10, 8]]}}}]}"#,
        );
        let migrated = migrate(&style, reference::latest()).unwrap();
        assert!(matches!(
            migrated.layers[0].paint_classes["night"].get("line-width").unwrap(),
            PropertyValue::Function(FunctionSpec::Piecewise { .. })
        ));
    }

    #[test]
    fn test_values_without_stops_pass_through() {
        let style = doc(
            r##"{"version": 7, "layers": [{"id": "a", "type": "line",
                "paint": {"line-color": "#123456", "line-translate": [1, 2]}}]}"##,
        );
        let migrated = migrate(&style, reference::latest()).unwrap();
        assert_eq!(
            migrated.layers[0].paint.get("line-color").unwrap(),
            &PropertyValue::Constant(Value::String("#123456".into()))
        );
        assert_eq!(
            migrated.layers[0].paint.get("line-translate").unwrap(),
            &PropertyValue::Constant(from_json("[1, 2]").unwrap())
        );
    }
}
