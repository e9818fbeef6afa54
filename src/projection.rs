//! Ready-made [`Projection`] implementations.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::coordinate::Coordinate;
use crate::segment::PlanarPoint;
use crate::traits::Projection;

/// WGS84 semi-major axis, the sphere radius of spherical Mercator.
const SEMIMAJOR_M: f64 = 6_378_137.0;

/// Latitude at which spherical Mercator becomes square.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Size of one tile in pixels.
const TILE_SIZE: f64 = 256.0;

/// Spherical Mercator in pixel units of a slippy map at a zoom level.
///
/// Latitudes are clamped to [`MAX_MERCATOR_LATITUDE`]. Longitudes are not
/// wrapped, so a route normalized to 190° stays east of 180° in planar space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    zoom: f64,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self { zoom: 2.0 }
    }
}

impl WebMercator {
    pub fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    fn scale(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }
}

impl Projection for WebMercator {
    fn project(&self, coordinate: Coordinate) -> Option<PlanarPoint> {
        if !coordinate.lat.is_finite() || !coordinate.lng.is_finite() {
            return None;
        }

        let lat = coordinate
            .lat
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();
        let x = SEMIMAJOR_M * coordinate.lng.to_radians();
        let y = SEMIMAJOR_M * (FRAC_PI_4 + lat / 2.0).tan().ln();

        let k = 0.5 / (PI * SEMIMAJOR_M);
        let scale = self.scale();
        let point = PlanarPoint::new(scale * (k * x + 0.5), scale * (0.5 - k * y));

        if point.x.is_finite() && point.y.is_finite() {
            Some(point)
        } else {
            None
        }
    }

    fn unproject(&self, point: PlanarPoint) -> Option<Coordinate> {
        let k = 0.5 / (PI * SEMIMAJOR_M);
        let scale = self.scale();
        let x = (point.x / scale - 0.5) / k;
        let y = (0.5 - point.y / scale) / k;

        let lng = (x / SEMIMAJOR_M).to_degrees();
        let lat = (2.0 * (y / SEMIMAJOR_M).exp().atan() - FRAC_PI_2).to_degrees();

        if lat.is_finite() && lng.is_finite() {
            Some(Coordinate::new(lat, lng))
        } else {
            None
        }
    }
}

/// Plate carrée: `x = lng`, `y = lat`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn project(&self, coordinate: Coordinate) -> Option<PlanarPoint> {
        Some(PlanarPoint::new(coordinate.lng, coordinate.lat))
    }

    fn unproject(&self, point: PlanarPoint) -> Option<Coordinate> {
        Some(Coordinate::new(point.y, point.x))
    }
}
