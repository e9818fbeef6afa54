//! Maritime boundary layers flattened into two-point segments.

use std::sync::Arc;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Position, Value};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Configuration of one boundary layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLayer {
    /// Display name, e.g. "EEZ (200NM)". Reported in crossing sets.
    pub name: String,
    /// Location of the GeoJSON file, relative to the source root or absolute.
    pub url: String,
    #[serde(default)]
    pub exclude: Option<ExclusionFilter>,
}

impl BoundaryLayer {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            exclude: None,
        }
    }

    pub fn excluding(mut self, filter: ExclusionFilter) -> Self {
        self.exclude = Some(filter);
        self
    }
}

/// Drops features whose `property` equals one of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionFilter {
    pub property: String,
    pub values: Vec<String>,
}

impl ExclusionFilter {
    pub fn new(property: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            property: property.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn excludes(&self, feature: &Feature) -> bool {
        match property(feature.properties.as_ref(), &self.property) {
            Some(JsonValue::String(value)) => self.values.iter().any(|v| v == value),
            _ => false,
        }
    }
}

/// EEZ, contiguous zone and territorial waters, as published under `/data`.
pub fn default_layers() -> Vec<BoundaryLayer> {
    vec![
        BoundaryLayer::new("EEZ (200NM)", "/data/eez_simple.geojson")
            .excluding(ExclusionFilter::new("LINE_TYPE", ["Connection line"])),
        BoundaryLayer::new("Contiguous Zone (24NM)", "/data/24NM_simple.geojson"),
        BoundaryLayer::new("Territorial Waters (12NM)", "/data/12NM_simple.geojson"),
    ]
}

/// Feature properties carried onto intersection markers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundaryMetadata {
    pub line_name: Option<String>,
    pub territory1: Option<String>,
    pub territory2: Option<String>,
    pub length_km: Option<f64>,
    pub source: Option<String>,
    pub source_url: Option<String>,
}

impl BoundaryMetadata {
    pub fn from_properties(properties: Option<&JsonObject>) -> Self {
        let text = |key: &str| match property(properties, key) {
            Some(JsonValue::String(value)) if !value.is_empty() => Some(value.clone()),
            _ => None,
        };
        let length_km = match property(properties, "LENGTH_KM") {
            Some(JsonValue::Number(n)) => n.as_f64(),
            Some(JsonValue::String(s)) => s.trim().parse().ok(),
            _ => None,
        };

        Self {
            line_name: text("LINE_NAME"),
            territory1: text("TERRITORY1"),
            territory2: text("TERRITORY2"),
            length_km,
            source: text("SOURCE1"),
            source_url: text("URL1"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One edge of a boundary polyline, in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySegment {
    pub layer: String,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Shared by every segment of the same feature.
    pub metadata: Arc<BoundaryMetadata>,
}

/// Flatten a layer's features into segments.
///
/// Each line, ring or part is walked on its own; consecutive parts are never
/// joined. Features without geometry, point geometries and excluded features
/// contribute nothing.
pub fn extract(layer: &BoundaryLayer, collection: &FeatureCollection) -> Vec<BoundarySegment> {
    let mut segments = Vec::new();

    for feature in &collection.features {
        let Some(geometry) = feature.geometry.as_ref() else {
            continue;
        };
        if let Some(filter) = &layer.exclude {
            if filter.excludes(feature) {
                continue;
            }
        }

        let metadata = Arc::new(BoundaryMetadata::from_properties(feature.properties.as_ref()));
        let mut parts = Vec::new();
        collect_parts(geometry, &mut parts);

        for part in parts {
            let coords: Vec<Coordinate> = part.iter().filter_map(to_coordinate).collect();
            segments.extend(coords.windows(2).map(|pair| BoundarySegment {
                layer: layer.name.clone(),
                start: pair[0],
                end: pair[1],
                metadata: Arc::clone(&metadata),
            }));
        }
    }

    segments
}

/// Parse a layer file. A single feature or a bare geometry is wrapped into a
/// one-feature collection.
pub fn parse_layer(text: &str) -> Result<FeatureCollection, geojson::Error> {
    Ok(match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(feature) => single(feature),
        GeoJson::Geometry(geometry) => single(Feature::from(geometry)),
    })
}

fn single(feature: Feature) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    }
}

fn collect_parts<'a>(geometry: &'a Geometry, parts: &mut Vec<&'a [Position]>) {
    match &geometry.value {
        Value::Point(_) | Value::MultiPoint(_) => {}
        Value::LineString(line) => parts.push(line.as_slice()),
        Value::MultiLineString(lines) => parts.extend(lines.iter().map(|l| l.as_slice())),
        Value::Polygon(rings) => parts.extend(rings.iter().map(|r| r.as_slice())),
        Value::MultiPolygon(polygons) => {
            parts.extend(polygons.iter().flatten().map(|r| r.as_slice()))
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_parts(geometry, parts);
            }
        }
    }
}

/// GeoJSON positions are `[lng, lat, ...]`.
fn to_coordinate(position: &Position) -> Option<Coordinate> {
    let lng = *position.first()?;
    let lat = *position.get(1)?;
    (lat.is_finite() && lng.is_finite()).then(|| Coordinate::new(lat, lng))
}

fn property<'a>(properties: Option<&'a JsonObject>, key: &str) -> Option<&'a JsonValue> {
    properties.and_then(|props| props.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EEZ: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "LINE_NAME": "Fiji - Tonga",
                    "TERRITORY1": "Fiji",
                    "TERRITORY2": "Tonga",
                    "LENGTH_KM": 412.5,
                    "LINE_TYPE": "Treaty",
                    "SOURCE1": "Treaty text",
                    "URL1": "https://example.org/fiji-tonga"
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[178.0, -20.0], [179.0, -19.0], [179.5, -17.0]]
                }
            },
            {
                "type": "Feature",
                "properties": { "LINE_TYPE": "Connection line" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0.0, 0.0], [1.0, 1.0]]
                }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": null
            }
        ]
    }"#;

    fn eez_layer() -> BoundaryLayer {
        BoundaryLayer::new("EEZ (200NM)", "/data/eez_simple.geojson")
            .excluding(ExclusionFilter::new("LINE_TYPE", ["Connection line"]))
    }

    #[test]
    fn test_extract_line_string_with_metadata() {
        let collection = parse_layer(EEZ).expect("valid geojson");
        let segments = extract(&eez_layer(), &collection);

        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.layer == "EEZ (200NM)"));
        assert_eq!(segments[0].start, Coordinate::new(-20.0, 178.0));
        assert_eq!(segments[0].end, Coordinate::new(-19.0, 179.0));
        assert_eq!(segments[1].start, segments[0].end);

        let metadata = &segments[0].metadata;
        assert_eq!(metadata.line_name.as_deref(), Some("Fiji - Tonga"));
        assert_eq!(metadata.territory1.as_deref(), Some("Fiji"));
        assert_eq!(metadata.territory2.as_deref(), Some("Tonga"));
        assert_eq!(metadata.length_km, Some(412.5));
        assert_eq!(metadata.source_url.as_deref(), Some("https://example.org/fiji-tonga"));
    }

    #[test]
    fn test_exclusion_is_per_layer() {
        let collection = parse_layer(EEZ).expect("valid geojson");
        let unfiltered = BoundaryLayer::new("Territorial Waters (12NM)", "/x.geojson");
        assert_eq!(extract(&unfiltered, &collection).len(), 3);
    }

    #[test]
    fn test_multi_parts_are_not_bridged() {
        let text = r#"{
            "type": "MultiLineString",
            "coordinates": [
                [[0.0, 0.0], [1.0, 0.0]],
                [[5.0, 5.0], [6.0, 5.0], [7.0, 5.0]]
            ]
        }"#;
        let collection = parse_layer(text).expect("bare geometry");
        let segments = extract(&BoundaryLayer::new("L", "l.geojson"), &collection);

        assert_eq!(segments.len(), 3);
        let bridge = (Coordinate::new(0.0, 1.0), Coordinate::new(5.0, 5.0));
        assert!(!segments.iter().any(|s| (s.start, s.end) == bridge));
        assert!(segments.iter().all(|s| s.metadata.is_empty()));
    }

    #[test]
    fn test_polygon_rings() {
        let text = r#"{
            "type": "Feature",
            "properties": { "LENGTH_KM": "12.0" },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [
                        [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]],
                        [[1.0, 1.0], [2.0, 1.0], [1.0, 2.0], [1.0, 1.0]]
                    ],
                    [
                        [[10.0, 10.0], [11.0, 10.0], [10.0, 11.0], [10.0, 10.0]]
                    ]
                ]
            }
        }"#;
        let collection = parse_layer(text).expect("single feature");
        let segments = extract(&BoundaryLayer::new("L", "l.geojson"), &collection);

        assert_eq!(segments.len(), 9);
        assert_eq!(segments[0].metadata.length_km, Some(12.0));
    }

    #[test]
    fn test_points_and_collections() {
        let text = r#"{
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [1.0, 1.0] },
                { "type": "MultiPoint", "coordinates": [[1.0, 1.0], [2.0, 2.0]] },
                { "type": "LineString", "coordinates": [[1.0, 1.0], [2.0, 2.0]] }
            ]
        }"#;
        let collection = parse_layer(text).expect("collection");
        let segments = extract(&BoundaryLayer::new("L", "l.geojson"), &collection);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_layer("<html>not found</html>").is_err());
    }

    #[test]
    fn test_default_layers() {
        let layers = default_layers();
        let names: Vec<_> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["EEZ (200NM)", "Contiguous Zone (24NM)", "Territorial Waters (12NM)"]
        );
        assert!(layers[0].exclude.is_some());
        assert!(layers[1].exclude.is_none());
    }

    #[test]
    fn test_layer_config_from_json() {
        let json = r#"[
            { "name": "EEZ", "url": "eez.geojson",
              "exclude": { "property": "LINE_TYPE", "values": ["Connection line"] } },
            { "name": "12NM", "url": "12nm.geojson" }
        ]"#;
        let layers: Vec<BoundaryLayer> = serde_json::from_str(json).expect("valid config");
        assert_eq!(layers[0].exclude.as_ref().map(|f| f.values.len()), Some(1));
        assert_eq!(layers[1].exclude, None);
    }
}
