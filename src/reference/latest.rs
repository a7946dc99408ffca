//! The embedded reference document for the latest schema version.

use once_cell::sync::OnceCell;

use super::descriptor::StyleReference;

/// Returns the reference document for the latest schema version.
///
/// Parsed once; the result is shared. Callers needing a different version
/// (or a fixture) construct their own via [`StyleReference::from_yaml`] and
/// pass it explicitly.
pub fn latest() -> &'static StyleReference {
    static LATEST: OnceCell<StyleReference> = OnceCell::new();
    LATEST.get_or_init(|| {
        StyleReference::from_yaml(LATEST_REFERENCE_YAML).expect("embedded reference should parse")
    })
}

/// LATEST_REFERENCE_YAML enumerates the paint and layout properties of the
/// latest schema version, grouped per layer type.
pub const LATEST_REFERENCE_YAML: &str = r##"version: 8
layout:
- layout_fill
- layout_line
- layout_symbol
- layout_circle
- layout_raster
- layout_background
- layout_fill-extrusion
- layout_heatmap
- layout_hillshade
paint:
- paint_fill
- paint_line
- paint_symbol
- paint_circle
- paint_raster
- paint_background
- paint_fill-extrusion
- paint_heatmap
- paint_hillshade
layout_fill:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
layout_line:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
  line-cap:
    type: enum
    function: piecewise-constant
    values: [butt, round, square]
    default: butt
  line-join:
    type: enum
    function: piecewise-constant
    values: [bevel, round, miter]
    default: miter
  line-miter-limit:
    type: number
    function: interpolated
    default: 2
  line-round-limit:
    type: number
    function: interpolated
    default: 1.05
layout_symbol:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
  symbol-placement:
    type: enum
    function: piecewise-constant
    values: [point, line]
    default: point
  symbol-spacing:
    type: number
    function: interpolated
    units: pixels
    default: 250
  icon-image:
    type: string
    function: piecewise-constant
  icon-size:
    type: number
    function: interpolated
    default: 1
  icon-rotate:
    type: number
    function: interpolated
    units: degrees
    default: 0
  icon-allow-overlap:
    type: boolean
    function: piecewise-constant
    default: false
  text-field:
    type: string
    function: piecewise-constant
  text-font:
    type: array
    function: piecewise-constant
  text-size:
    type: number
    function: interpolated
    units: pixels
    default: 16
  text-max-width:
    type: number
    function: interpolated
    units: ems
    default: 10
  text-transform:
    type: enum
    function: piecewise-constant
    values: [none, uppercase, lowercase]
    default: none
layout_circle:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
layout_raster:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
layout_background:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
layout_fill-extrusion:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
layout_heatmap:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
layout_hillshade:
  visibility:
    type: enum
    values: [visible, none]
    default: visible
paint_fill:
  fill-antialias:
    type: boolean
    function: piecewise-constant
    default: true
  fill-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
  fill-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  fill-outline-color:
    type: color
    function: interpolated
    transition: true
  fill-translate:
    type: array
    function: interpolated
    transition: true
    units: pixels
  fill-translate-anchor:
    type: enum
    function: piecewise-constant
    values: [map, viewport]
    default: map
  fill-pattern:
    type: string
    function: piecewise-constant
    transition: true
paint_line:
  line-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
  line-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  line-translate:
    type: array
    function: interpolated
    transition: true
    units: pixels
  line-translate-anchor:
    type: enum
    function: piecewise-constant
    values: [map, viewport]
    default: map
  line-width:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 1
  line-gap-width:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 0
  line-offset:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 0
  line-blur:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 0
  line-dasharray:
    type: array
    function: piecewise-constant
    transition: true
    units: line widths
  line-pattern:
    type: string
    function: piecewise-constant
    transition: true
paint_symbol:
  icon-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
  icon-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  icon-halo-color:
    type: color
    function: interpolated
    transition: true
  icon-halo-width:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 0
  text-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
  text-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  text-halo-color:
    type: color
    function: interpolated
    transition: true
  text-halo-width:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 0
paint_circle:
  circle-radius:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 5
  circle-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  circle-blur:
    type: number
    function: interpolated
    transition: true
    default: 0
  circle-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
  circle-translate:
    type: array
    function: interpolated
    transition: true
    units: pixels
  circle-translate-anchor:
    type: enum
    function: piecewise-constant
    values: [map, viewport]
    default: map
paint_raster:
  raster-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
  raster-hue-rotate:
    type: number
    function: interpolated
    transition: true
    units: degrees
    default: 0
  raster-brightness-min:
    type: number
    function: interpolated
    transition: true
    default: 0
  raster-brightness-max:
    type: number
    function: interpolated
    transition: true
    default: 1
  raster-saturation:
    type: number
    function: interpolated
    transition: true
    default: 0
  raster-contrast:
    type: number
    function: interpolated
    transition: true
    default: 0
  raster-fade-duration:
    type: number
    function: interpolated
    units: milliseconds
    default: 300
paint_background:
  background-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  background-pattern:
    type: string
    function: piecewise-constant
    transition: true
  background-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
paint_fill-extrusion:
  fill-extrusion-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
  fill-extrusion-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  fill-extrusion-height:
    type: number
    function: interpolated
    transition: true
    units: meters
    default: 0
  fill-extrusion-base:
    type: number
    function: interpolated
    transition: true
    units: meters
    default: 0
paint_heatmap:
  heatmap-radius:
    type: number
    function: interpolated
    transition: true
    units: pixels
    default: 30
  heatmap-weight:
    type: number
    function: interpolated
    default: 1
  heatmap-intensity:
    type: number
    function: interpolated
    transition: true
    default: 1
  heatmap-opacity:
    type: number
    function: interpolated
    transition: true
    default: 1
paint_hillshade:
  hillshade-illumination-direction:
    type: number
    function: interpolated
    units: degrees
    default: 335
  hillshade-illumination-anchor:
    type: enum
    function: piecewise-constant
    values: [map, viewport]
    default: viewport
  hillshade-exaggeration:
    type: number
    function: interpolated
    transition: true
    default: 0.5
  hillshade-shadow-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
  hillshade-highlight-color:
    type: color
    function: interpolated
    transition: true
    default: "#ffffff"
  hillshade-accent-color:
    type: color
    function: interpolated
    transition: true
    default: "#000000"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{PropertyFunction, PropertyType};

    #[test]
    fn test_latest_reference_parses() {
        let reference = latest();
        assert_eq!(reference.version, 8);
        assert_eq!(reference.layout.len(), 9);
        assert_eq!(reference.paint.len(), 9);
    }

    #[test]
    fn test_latest_reference_lookups() {
        let reference = latest();

        let color = reference.paint_property("fill-color").unwrap();
        assert_eq!(color.property_type, PropertyType::Color);
        assert_eq!(color.function, Some(PropertyFunction::Interpolated));
        assert!(color.transition);

        let dasharray = reference.paint_property("line-dasharray").unwrap();
        assert_eq!(dasharray.function, Some(PropertyFunction::PiecewiseConstant));

        let cap = reference.layout_property("line-cap").unwrap();
        assert_eq!(cap.values, vec!["butt", "round", "square"]);

        assert!(reference.paint_property("no-such-property").is_none());
    }
}
