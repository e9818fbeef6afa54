//! Boundary layer sources (HTTP and local directory) and concurrent loading.

use std::fs;
use std::path::{Path, PathBuf};

use geojson::FeatureCollection;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::boundary::{BoundaryLayer, BoundarySegment, extract, parse_layer};
use crate::error::BoundaryFetchError;
use crate::traits::BoundarySource;

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Fetches layer files over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBoundarySource {
    config: HttpSourceConfig,
    client: reqwest::blocking::Client,
}

impl HttpBoundarySource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Absolute layer URLs are used as is, anything else is joined onto the
    /// base URL.
    pub fn layer_url(&self, layer: &BoundaryLayer) -> String {
        if layer.url.starts_with("http://") || layer.url.starts_with("https://") {
            return layer.url.clone();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            layer.url.trim_start_matches('/')
        )
    }
}

impl BoundarySource for HttpBoundarySource {
    fn fetch(&self, layer: &BoundaryLayer) -> Result<FeatureCollection, BoundaryFetchError> {
        let http = |source: reqwest::Error| BoundaryFetchError::Http {
            layer: layer.name.clone(),
            source,
        };

        let text = self
            .client
            .get(self.layer_url(layer))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(http)?;

        parse_layer(&text).map_err(|source| BoundaryFetchError::Parse {
            layer: layer.name.clone(),
            source,
        })
    }
}

/// Reads layer files from a directory; a layer URL of `/data/eez.geojson`
/// resolves to `<root>/data/eez.geojson`.
#[derive(Debug, Clone)]
pub struct DirectoryBoundarySource {
    root: PathBuf,
}

impl DirectoryBoundarySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layer_path(&self, layer: &BoundaryLayer) -> PathBuf {
        self.root.join(layer.url.trim_start_matches('/'))
    }
}

impl BoundarySource for DirectoryBoundarySource {
    fn fetch(&self, layer: &BoundaryLayer) -> Result<FeatureCollection, BoundaryFetchError> {
        let path = self.layer_path(layer);
        let text = fs::read_to_string(&path).map_err(|source| BoundaryFetchError::Io {
            layer: layer.name.clone(),
            path: path.clone(),
            source,
        })?;

        parse_layer(&text).map_err(|source| BoundaryFetchError::Parse {
            layer: layer.name.clone(),
            source,
        })
    }
}

/// Outcome of loading one layer.
#[derive(Debug)]
pub struct LayerLoad {
    pub layer: String,
    pub result: Result<Vec<BoundarySegment>, BoundaryFetchError>,
}

/// Fetch and flatten every layer concurrently.
///
/// Results come back in `layers` order. A failed layer is logged and reported
/// on its own entry; it never affects the others.
pub fn load_layers<S>(source: &S, layers: &[BoundaryLayer]) -> Vec<LayerLoad>
where
    S: BoundarySource + Sync,
{
    layers
        .par_iter()
        .map(|layer| {
            let result = source
                .fetch(layer)
                .map(|collection| extract(layer, &collection));

            match &result {
                Ok(segments) => info!(layer = %layer.name, segments = segments.len(), "boundary layer loaded"),
                Err(err) => warn!(layer = %layer.name, error = %err, "boundary layer unavailable"),
            }

            LayerLoad {
                layer: layer.name.clone(),
                result,
            }
        })
        .collect()
}
