//! Collaborator seams.
//!
//! The host map view supplies the projection and the boundary data. These
//! traits are what the engine needs from them; [`crate::projection`] and
//! [`crate::source`] carry ready-made implementations.

use geojson::FeatureCollection;

use crate::boundary::BoundaryLayer;
use crate::coordinate::Coordinate;
use crate::error::BoundaryFetchError;
use crate::haversine::haversine_m;
use crate::segment::PlanarPoint;

/// Maps geographic coordinates to the planar space of the current view and
/// back.
///
/// `project` may refuse a coordinate (e.g. a pole under Mercator); segments
/// touching a refused vertex are left out of intersection passes.
pub trait Projection {
    fn project(&self, coordinate: Coordinate) -> Option<PlanarPoint>;

    fn unproject(&self, point: PlanarPoint) -> Option<Coordinate>;

    /// Distance used for the merge threshold. Meters on a sphere by default.
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        haversine_m(a, b)
    }
}

/// Provides the raw GeoJSON of one boundary layer.
pub trait BoundarySource {
    fn fetch(&self, layer: &BoundaryLayer) -> Result<FeatureCollection, BoundaryFetchError>;
}
