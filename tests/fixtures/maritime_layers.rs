//! Canned maritime boundary layers around a fictional coast.
//!
//! The coast runs north-south along the prime meridian; each zone limit is a
//! straight north-south line further east:
//!
//! - territorial waters (12NM) at 4°E
//! - contiguous zone (24NM) at 6°E
//! - EEZ (200NM) at 10°E, plus a construction "Connection line" at 12°E
//!
//! A cable along the equator from 0°E to 20°E therefore crosses each limit
//! exactly once.

pub const EEZ_URL: &str = "/data/eez_simple.geojson";
pub const CONTIGUOUS_URL: &str = "/data/24NM_simple.geojson";
pub const TERRITORIAL_URL: &str = "/data/12NM_simple.geojson";

pub const EEZ_NAME: &str = "EEZ (200NM)";
pub const CONTIGUOUS_NAME: &str = "Contiguous Zone (24NM)";
pub const TERRITORIAL_NAME: &str = "Territorial Waters (12NM)";

pub const EEZ: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {
                "LINE_NAME": "Coastland - High Seas",
                "LINE_TYPE": "200 NM",
                "TERRITORY1": "Coastland",
                "TERRITORY2": "High Seas",
                "LENGTH_KM": 2226.4,
                "SOURCE1": "National legislation",
                "URL1": "https://example.org/coastland/eez"
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[10.0, -10.0], [10.0, 0.5], [10.0, 10.0]]
            }
        },
        {
            "type": "Feature",
            "properties": { "LINE_TYPE": "Connection line" },
            "geometry": {
                "type": "LineString",
                "coordinates": [[12.0, -10.0], [12.0, 10.0]]
            }
        }
    ]
}"#;

pub const CONTIGUOUS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "TERRITORY1": "Coastland" },
            "geometry": {
                "type": "MultiLineString",
                "coordinates": [
                    [[6.0, -10.0], [6.0, -0.5]],
                    [[6.0, -0.5], [6.0, 10.0]]
                ]
            }
        }
    ]
}"#;

pub const TERRITORIAL: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "TERRITORY1": "Coastland" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, -10.0], [4.0, -10.0], [4.0, 10.0], [0.0, 10.0], [0.0, -10.0]]]
            }
        }
    ]
}"#;

/// `(url, geojson)` for every layer.
pub const ALL: &[(&str, &str)] = &[
    (EEZ_URL, EEZ),
    (CONTIGUOUS_URL, CONTIGUOUS),
    (TERRITORIAL_URL, TERRITORIAL),
];
