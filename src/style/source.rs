//! Source specifications.

use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};

/// SourceSpec is a named data provider referenced by layers.
///
/// The shape depends on `type`. Diffing compares sources by presence only,
/// so the variants matter for (de)serialization of `addSource` payloads and
/// for deep equality, not for any per-field diffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SourceSpec {
    Vector(TileSource),
    Raster(TileSource),
    RasterDem(TileSource),
    Geojson(GeojsonSource),
    Image(MediaSource),
    Video(MediaSource),
}

impl SourceSpec {
    pub fn type_name(&self) -> &'static str {
        match self {
            SourceSpec::Vector(_) => "vector",
            SourceSpec::Raster(_) => "raster",
            SourceSpec::RasterDem(_) => "raster-dem",
            SourceSpec::Geojson(_) => "geojson",
            SourceSpec::Image(_) => "image",
            SourceSpec::Video(_) => "video",
        }
    }
}

/// TileSource covers vector, raster, and raster-dem sources: tiles come
/// either from a TileJSON `url` or an inline `tiles` template list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiles: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "tileSize")]
    pub tile_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,

    /// Tile coordinate scheme, `xyz` or `tms`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(flatten)]
    pub extra: Map,
}

/// GeojsonSource carries inline GeoJSON or a URL to fetch it from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeojsonSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "clusterRadius")]
    pub cluster_radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "clusterMaxZoom")]
    pub cluster_max_zoom: Option<f64>,

    #[serde(flatten)]
    pub extra: Map,
}

/// MediaSource covers image and video sources: content URL(s) pinned to
/// four corner coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<[f64; 2]>>,

    #[serde(flatten)]
    pub extra: Map,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_source_roundtrip() {
        let json = r#"{"type":"vector","url":"mapbox://mapbox.mapbox-streets-v7"}"#;
        let source: SourceSpec = serde_json::from_str(json).unwrap();
        assert_eq!(source.type_name(), "vector");
        assert_eq!(serde_json::to_string(&source).unwrap(), json);
    }

    #[test]
    fn test_raster_dem_tag() {
        let source: SourceSpec = serde_json::from_str(
            r#"{"type":"raster-dem","url":"mapbox://mapbox.terrain-rgb","tileSize":512}"#,
        )
        .unwrap();
        match &source {
            SourceSpec::RasterDem(tiles) => assert_eq!(tiles.tile_size, Some(512)),
            other => panic!("expected raster-dem, got {:?}", other),
        }
    }

    #[test]
    fn test_geojson_inline_data() {
        let source: SourceSpec = serde_json::from_str(
            r#"{"type":"geojson","data":{"type":"FeatureCollection","features":[]},"cluster":true}"#,
        )
        .unwrap();
        match &source {
            SourceSpec::Geojson(geojson) => {
                assert!(geojson.data.is_some());
                assert_eq!(geojson.cluster, Some(true));
            }
            other => panic!("expected geojson, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let source: SourceSpec = serde_json::from_str(
            r#"{"type":"vector","url":"mapbox://tiles","promoteId":"osm_id"}"#,
        )
        .unwrap();
        match &source {
            SourceSpec::Vector(tiles) => {
                assert_eq!(
                    tiles.extra.get("promoteId"),
                    Some(&Value::String("osm_id".into()))
                );
            }
            other => panic!("expected vector, got {:?}", other),
        }
    }

    #[test]
    fn test_deep_equality() {
        let a: SourceSpec =
            serde_json::from_str(r#"{"type":"vector","tiles":["https://a/{z}/{x}/{y}.pbf"]}"#)
                .unwrap();
        let b: SourceSpec =
            serde_json::from_str(r#"{"type":"vector","tiles":["https://a/{z}/{x}/{y}.pbf"]}"#)
                .unwrap();
        let c: SourceSpec =
            serde_json::from_str(r#"{"type":"vector","tiles":["https://b/{z}/{x}/{y}.pbf"]}"#)
                .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
