//! Planar segment intersection.

use serde::{Deserialize, Serialize};

/// A point in the projected 2-D space of the host map view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Crossing point of segments `p1`-`p2` and `p3`-`p4`.
///
/// Both parameters must lie in the closed interval [0, 1], so segments that
/// only touch at an endpoint intersect. A zero denominator (parallel,
/// collinear or zero-length segments) never intersects, even when the
/// segments overlap.
pub fn intersect(
    p1: PlanarPoint,
    p2: PlanarPoint,
    p3: PlanarPoint,
    p4: PlanarPoint,
) -> Option<PlanarPoint> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom == 0.0 {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = ((p1.x - p3.x) * (p1.y - p2.y) - (p1.y - p3.y) * (p1.x - p2.x)) / denom;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(PlanarPoint::new(
        p1.x + t * (p2.x - p1.x),
        p1.y + t * (p2.y - p1.y),
    ))
}
