//! The structural diff over two style documents.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::operation::Operation;
use crate::style::{LayerSpec, PropertyMap, PropertyValue, SourceSpec, StyleDocument};

/// Computes the ordered operation list transforming `before` into `after`.
///
/// Both documents must be of the same schema version; across versions a
/// single `setStyle` replace is emitted instead, since schema semantics may
/// have changed underneath every finer-grained operation.
///
/// The diff is best-effort structural comparison: it never fails, never
/// validates, and never mutates its inputs. `metadata` at document and
/// layer level is excluded from every comparison.
pub fn diff(before: &StyleDocument, after: &StyleDocument) -> Vec<Operation> {
    let mut operations = Vec::new();

    if before.version != after.version {
        operations.push(Operation::SetStyle {
            style: after.clone(),
        });
        return operations;
    }

    diff_sources(&before.sources, &after.sources, &mut operations);
    diff_layers(&before.layers, &after.layers, &mut operations);

    if before.light != after.light {
        operations.push(Operation::SetLight {
            light: after.light.clone(),
        });
    }

    // Camera fields are independent; all four are checked.
    if before.center != after.center {
        operations.push(Operation::SetCenter {
            center: after.center,
        });
    }
    if before.zoom != after.zoom {
        operations.push(Operation::SetZoom { zoom: after.zoom });
    }
    if before.bearing != after.bearing {
        operations.push(Operation::SetBearing {
            bearing: after.bearing,
        });
    }
    if before.pitch != after.pitch {
        operations.push(Operation::SetPitch { pitch: after.pitch });
    }

    operations
}

/// Sources are compared by presence only. A source present on both sides
/// is never updated in place: its identity is its configuration, and
/// replacing it is the caller's decision, not this diff's.
fn diff_sources(
    before: &BTreeMap<String, SourceSpec>,
    after: &BTreeMap<String, SourceSpec>,
    operations: &mut Vec<Operation>,
) {
    for id in before.keys() {
        if !after.contains_key(id) {
            operations.push(Operation::RemoveSource { id: id.clone() });
        }
    }
    for (id, source) in after {
        if !before.contains_key(id) {
            operations.push(Operation::AddSource {
                id: id.clone(),
                source: source.clone(),
            });
        }
    }
}

fn diff_layers(before: &[LayerSpec], after: &[LayerSpec], operations: &mut Vec<Operation>) {
    let before_order: Vec<&str> = before.iter().map(|l| l.id.as_str()).collect();
    let after_order: Vec<&str> = after.iter().map(|l| l.id.as_str()).collect();

    let before_index: HashMap<&str, &LayerSpec> =
        before.iter().map(|l| (l.id.as_str(), l)).collect();
    let after_index: HashMap<&str, &LayerSpec> =
        after.iter().map(|l| (l.id.as_str(), l)).collect();

    let removed: HashSet<&str> = before_order
        .iter()
        .copied()
        .filter(|id| !after_index.contains_key(id))
        .collect();

    // Removing a layer destroys every layer whose `ref` chain reaches it,
    // so those casualties must not get a removeLayer of their own.
    let casualties = ref_casualties(before, &removed);

    // Tracker mirrors the applier's layer list as operations replay.
    let mut tracker: Vec<&str> = Vec::with_capacity(before_order.len());
    for &id in &before_order {
        if removed.contains(id) || casualties.contains(id) {
            if removed.contains(id) && !casualties.contains(id) {
                operations.push(Operation::RemoveLayer { id: id.to_string() });
            }
        } else {
            tracker.push(id);
        }
    }

    // Add and reorder. Insertion anchors on the layer following the new
    // position, so walk the after order back to front: every anchor is
    // settled before it is named.
    let mut clean: HashSet<&str> = HashSet::new();
    let after_len = after_order.len();
    for i in 0..after_len {
        let id = after_order[after_len - 1 - i];

        // The last i entries of the tracker already match the after order.
        if tracker.len() > i && tracker[tracker.len() - 1 - i] == id {
            continue;
        }

        if before_index.contains_key(id) {
            // A moved layer is removed before re-inserting at the correct
            // position. Ref casualties are already gone on the applier
            // side and only need the re-insert.
            if let Some(position) = tracker.iter().position(|t| *t == id) {
                operations.push(Operation::RemoveLayer { id: id.to_string() });
                tracker.remove(position);
            }
        }

        let insert_before = if i == 0 {
            None
        } else {
            Some(after_order[after_len - i].to_string())
        };
        operations.push(Operation::AddLayer {
            layer: after_index[id].clone(),
            before: insert_before,
        });
        // Duplicate ids make this position meaningless, but duplicate ids
        // already make the whole diff undefined; just avoid underflow.
        let position = tracker.len().saturating_sub(i);
        tracker.insert(position, id);
        clean.insert(id);
    }

    // Property updates for layers that survived in place. Freshly added or
    // re-added layers already carry their full spec.
    let empty = PropertyMap::new();
    for after_layer in after {
        let id = after_layer.id.as_str();
        if clean.contains(id) {
            continue;
        }
        let before_layer = match before_index.get(id) {
            Some(layer) => *layer,
            None => continue,
        };
        if before_layer.same_ignoring_metadata(after_layer) {
            continue;
        }

        diff_properties(
            &before_layer.paint,
            &after_layer.paint,
            id,
            None,
            PropertyKind::Paint,
            operations,
        );
        let class_names: BTreeSet<&String> = before_layer
            .paint_classes
            .keys()
            .chain(after_layer.paint_classes.keys())
            .collect();
        for class in class_names {
            diff_properties(
                before_layer.paint_classes.get(class).unwrap_or(&empty),
                after_layer.paint_classes.get(class).unwrap_or(&empty),
                id,
                Some(class.as_str()),
                PropertyKind::Paint,
                operations,
            );
        }
        diff_properties(
            &before_layer.layout,
            &after_layer.layout,
            id,
            None,
            PropertyKind::Layout,
            operations,
        );

        // Filters are replaced wholesale, never diffed internally.
        if before_layer.filter != after_layer.filter {
            operations.push(Operation::SetFilter {
                layer: id.to_string(),
                filter: after_layer.filter.clone(),
            });
        }

        if before_layer.minzoom != after_layer.minzoom
            || before_layer.maxzoom != after_layer.maxzoom
        {
            operations.push(Operation::SetLayerZoomRange {
                layer: id.to_string(),
                minzoom: after_layer.minzoom,
                maxzoom: after_layer.maxzoom,
            });
        }

        // Changes to type, source, or source-layer are not representable
        // as in-place operations; callers changing identity-defining
        // fields should remove and re-add the layer instead.
    }
}

/// Computes the fixed point of layers destroyed by `ref` when their
/// (possibly transitive) target is removed.
fn ref_casualties<'a>(before: &'a [LayerSpec], removed: &HashSet<&str>) -> HashSet<&'a str> {
    let mut casualties: HashSet<&str> = HashSet::new();
    loop {
        let mut changed = false;
        for layer in before {
            if casualties.contains(layer.id.as_str()) {
                continue;
            }
            if let Some(target) = layer.ref_layer.as_deref() {
                if removed.contains(target) || casualties.contains(target) {
                    casualties.insert(layer.id.as_str());
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    casualties
}

#[derive(Clone, Copy)]
enum PropertyKind {
    Paint,
    Layout,
}

/// Emits one operation per changed property key; a key absent from `after`
/// emits with a null value. Nested value changes still replace the whole
/// property value: one level of granularity, no deeper.
fn diff_properties(
    before: &PropertyMap,
    after: &PropertyMap,
    layer_id: &str,
    class: Option<&str>,
    kind: PropertyKind,
    operations: &mut Vec<Operation>,
) {
    for (name, value) in before {
        let next = after.get(name);
        if next != Some(value) {
            operations.push(property_operation(
                kind,
                layer_id,
                name,
                next.cloned(),
                class,
            ));
        }
    }
    for (name, value) in after {
        if !before.contains_key(name) {
            operations.push(property_operation(
                kind,
                layer_id,
                name,
                Some(value.clone()),
                class,
            ));
        }
    }
}

fn property_operation(
    kind: PropertyKind,
    layer_id: &str,
    name: &str,
    value: Option<PropertyValue>,
    class: Option<&str>,
) -> Operation {
    let layer = layer_id.to_string();
    let name = name.to_string();
    let class = class.map(String::from);
    match kind {
        PropertyKind::Paint => Operation::SetPaintProperty {
            layer,
            name,
            value,
            class,
        },
        PropertyKind::Layout => Operation::SetLayoutProperty {
            layer,
            name,
            value,
            class,
        },
    }
}
