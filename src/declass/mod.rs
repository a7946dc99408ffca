//! Declass module - Flattening class-scoped paint overlays.

use crate::style::StyleDocument;

/// Merges the named `paint.<class>` overlays of every layer over its base
/// paint block, in the given order (later class names win on conflicts).
///
/// The overlays themselves are left untouched in the output; a class name
/// with no overlay on a layer is silently a no-op for that layer. The
/// input document is not modified.
pub fn declassify(style: &StyleDocument, class_names: &[String]) -> StyleDocument {
    let mut next = style.clone();
    for layer in &mut next.layers {
        for class in class_names {
            if let Some(overlay) = layer.paint_classes.get(class) {
                for (name, value) in overlay.clone() {
                    layer.paint.insert(name, value);
                }
            }
        }
    }
    next
}
