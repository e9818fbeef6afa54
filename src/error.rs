//! Error types used by the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::coordinate::Axis;

/// A single degree/direction value could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// Not `D.DDDD` to `DDD.DDDD`, or outside [0, 180].
    #[error("invalid coordinate `{value}`: expected DDD.DDDD between 0 and 180")]
    InvalidFormat { value: String },

    /// Hemisphere letter that does not belong to the axis.
    #[error("invalid {axis} direction `{value}`")]
    InvalidDirection { value: String, axis: Axis },
}

/// A route could not be admitted into the active route set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// `point` is 1-based, the way the add-cable form numbers points.
    #[error("invalid {axis} at point #{point} of route `{route}`: {source}")]
    InvalidCoordinate {
        route: String,
        point: usize,
        axis: Axis,
        #[source]
        source: CoordinateError,
    },

    #[error("route `{route}` has {count} point(s), at least 2 are required")]
    MissingVertices { route: String, count: usize },

    #[error("system name is required")]
    MissingName,

    #[error("a route with id `{0}` already exists")]
    DuplicateId(String),
}

/// A boundary layer could not be retrieved or parsed.
#[derive(Debug, Error)]
pub enum BoundaryFetchError {
    #[error("failed to fetch boundary layer `{layer}`: {source}")]
    Http {
        layer: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read boundary layer `{layer}` from {}: {source}", .path.display())]
    Io {
        layer: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("boundary layer `{layer}` is not valid GeoJSON: {source}")]
    Parse {
        layer: String,
        #[source]
        source: geojson::Error,
    },
}

impl BoundaryFetchError {
    /// Name of the layer that failed.
    pub fn layer(&self) -> &str {
        match self {
            BoundaryFetchError::Http { layer, .. }
            | BoundaryFetchError::Io { layer, .. }
            | BoundaryFetchError::Parse { layer, .. } => layer,
        }
    }
}
