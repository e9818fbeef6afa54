//! Test fixtures for cable-crossings.
//!
//! Provides:
//! - Canned maritime boundary layers around a fictional coast
//! - Builders for routes and form input
//! - In-memory and on-disk boundary sources
#![allow(dead_code)]

pub mod maritime_layers;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use geojson::FeatureCollection;

use cable_crossings::boundary::{BoundaryLayer, ExclusionFilter, parse_layer};
use cable_crossings::coordinate::{Coordinate, LatHemisphere, LngHemisphere, WaypointInput};
use cable_crossings::error::BoundaryFetchError;
use cable_crossings::route::{Route, RouteInput};
use cable_crossings::traits::BoundarySource;

/// The three layers of [`maritime_layers`], configured like the production map.
pub fn maritime_layer_config() -> Vec<BoundaryLayer> {
    use maritime_layers::*;

    vec![
        BoundaryLayer::new(EEZ_NAME, EEZ_URL)
            .excluding(ExclusionFilter::new("LINE_TYPE", ["Connection line"])),
        BoundaryLayer::new(CONTIGUOUS_NAME, CONTIGUOUS_URL),
        BoundaryLayer::new(TERRITORIAL_NAME, TERRITORIAL_URL),
    ]
}

/// A route with numeric `(lat, lng)` points; id and name are the same.
pub fn route(name: &str, points: &[(f64, f64)]) -> Route {
    Route::from_coordinates(name, name, points.iter().copied().map(Coordinate::from).collect())
}

/// Form input for a signed `(lat, lng)` pair, as an operator would type it.
pub fn waypoint(lat: f64, lng: f64) -> WaypointInput {
    let lat_dir = if lat < 0.0 { LatHemisphere::S } else { LatHemisphere::N };
    let lng_dir = if lng < 0.0 { LngHemisphere::W } else { LngHemisphere::E };
    WaypointInput::new(
        format!("{:.4}", lat.abs()),
        lat_dir,
        format!("{:.4}", lng.abs()),
        lng_dir,
    )
}

pub fn route_input(id: &str, name: &str, points: &[(f64, f64)]) -> RouteInput {
    RouteInput {
        id: id.to_string(),
        system_name: name.to_string(),
        owner: None,
        color: None,
        waypoints: points.iter().map(|&(lat, lng)| waypoint(lat, lng)).collect(),
    }
}

/// Serves layers from memory, keyed by layer URL. Unknown URLs fail with
/// `NotFound`.
#[derive(Debug, Default)]
pub struct StaticBoundarySource {
    files: HashMap<String, String>,
}

impl StaticBoundarySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn maritime() -> Self {
        let mut source = Self::new();
        for (url, text) in maritime_layers::ALL {
            source = source.with_file(url, text);
        }
        source
    }

    pub fn with_file(mut self, url: &str, text: &str) -> Self {
        self.files.insert(url.to_string(), text.to_string());
        self
    }

    pub fn without_file(mut self, url: &str) -> Self {
        self.files.remove(url);
        self
    }
}

impl BoundarySource for StaticBoundarySource {
    fn fetch(&self, layer: &BoundaryLayer) -> Result<FeatureCollection, BoundaryFetchError> {
        let text = self.files.get(&layer.url).ok_or_else(|| BoundaryFetchError::Io {
            layer: layer.name.clone(),
            path: PathBuf::from(&layer.url),
            source: io::Error::new(io::ErrorKind::NotFound, "no such layer file"),
        })?;

        parse_layer(text).map_err(|source| BoundaryFetchError::Parse {
            layer: layer.name.clone(),
            source,
        })
    }
}

/// A fresh directory under the system temp dir holding the maritime layers
/// at their configured URLs.
pub fn maritime_data_dir(tag: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "cable-crossings-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&root);

    for (url, text) in maritime_layers::ALL {
        let path = root.join(url.trim_start_matches('/'));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create layer directory");
        }
        fs::write(&path, text).expect("write layer file");
    }

    root
}
