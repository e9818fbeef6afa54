//! Cable crossing aggregation.
//!
//! Runs every route segment against every other route's segments and against
//! every boundary segment, merges hits that land on (nearly) the same spot,
//! and records per route which cables and boundary layers it crosses.
//!
//! There is no spatial index: work is O(R²·S² + R·S·B), fine at the scale of
//! an interactively edited map.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::boundary::{BoundaryMetadata, BoundarySegment};
use crate::coordinate::Coordinate;
use crate::route::{MIN_ROUTE_POINTS, Route};
use crate::segment::{PlanarPoint, intersect};
use crate::traits::Projection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveOptions {
    /// Hits closer than this (in [`Projection::distance`] units, meters for
    /// the bundled projections) become one marker.
    pub merge_threshold: f64,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            merge_threshold: 1e-4,
        }
    }
}

/// Which boundary feature a marker sits on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryAttribution {
    pub layer: String,
    pub metadata: BoundaryMetadata,
}

impl BoundaryAttribution {
    fn from_segment(segment: &BoundarySegment) -> Self {
        Self {
            layer: segment.layer.clone(),
            metadata: (*segment.metadata).clone(),
        }
    }
}

/// A crossing marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub coordinate: Coordinate,
    /// Names of every cable meeting at this point.
    pub cables: BTreeSet<String>,
    /// Every boundary attribution merged into this marker, oldest first.
    pub boundaries: Vec<BoundaryAttribution>,
}

impl Intersection {
    /// The most recently written attribution.
    pub fn boundary(&self) -> Option<&BoundaryAttribution> {
        self.boundaries.last()
    }
}

/// Crossings of one route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteCrossings {
    pub cables_crossed: BTreeSet<String>,
    pub boundaries_crossed: BTreeSet<String>,
}

/// Route id to its crossings. Cable entries are symmetric: if A lists B,
/// B lists A.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrossingIndex {
    routes: BTreeMap<String, RouteCrossings>,
}

impl CrossingIndex {
    pub fn get(&self, route_id: &str) -> Option<&RouteCrossings> {
        self.routes.get(route_id)
    }

    pub fn cables_crossed(&self, route_id: &str) -> Option<&BTreeSet<String>> {
        self.get(route_id).map(|crossings| &crossings.cables_crossed)
    }

    pub fn boundaries_crossed(&self, route_id: &str) -> Option<&BTreeSet<String>> {
        self.get(route_id).map(|crossings| &crossings.boundaries_crossed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteCrossings)> {
        self.routes.iter().map(|(id, crossings)| (id.as_str(), crossings))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn entry(&mut self, route_id: &str) -> &mut RouteCrossings {
        self.routes.entry(route_id.to_string()).or_default()
    }
}

/// Output of one aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Derivation {
    pub intersections: Vec<Intersection>,
    pub crossing_index: CrossingIndex,
}

/// Compute all crossing markers and the crossing index for a snapshot of
/// routes and boundary segments.
///
/// The cable pass runs first and its crossing index is the starting point of
/// the boundary pass.
pub fn derive_intersections<P: Projection>(
    routes: &[Route],
    boundaries: &[BoundarySegment],
    projection: &P,
    options: &DeriveOptions,
) -> Derivation {
    let mut accumulator = IntersectionAccumulator::new(projection, options);
    accumulator.cable_pass(routes);
    accumulator.boundary_pass(routes, boundaries);
    let derivation = accumulator.finish();

    info!(
        routes = routes.len(),
        boundary_segments = boundaries.len(),
        intersections = derivation.intersections.len(),
        "derived cable crossings"
    );

    derivation
}

/// Collects hits, merging those within the threshold of an earlier one.
pub struct IntersectionAccumulator<'p, P: Projection> {
    projection: &'p P,
    merge_threshold: f64,
    intersections: Vec<Intersection>,
    index: CrossingIndex,
}

impl<'p, P: Projection> IntersectionAccumulator<'p, P> {
    pub fn new(projection: &'p P, options: &DeriveOptions) -> Self {
        Self::seeded(projection, options, CrossingIndex::default())
    }

    /// Start from an existing crossing index, so crossings it already holds
    /// survive this accumulation.
    pub fn seeded(projection: &'p P, options: &DeriveOptions, index: CrossingIndex) -> Self {
        Self {
            projection,
            merge_threshold: options.merge_threshold,
            intersections: Vec::new(),
            index,
        }
    }

    /// Every unordered pair of distinct routes, every segment pair.
    pub fn cable_pass(&mut self, routes: &[Route]) {
        let projected: Vec<_> = routes.iter().map(|route| self.project_route(route)).collect();

        for (i, route_a) in routes.iter().enumerate() {
            self.index.entry(&route_a.id);

            for (j, route_b) in routes.iter().enumerate().skip(i + 1) {
                for (a1, a2) in planar_segments(&projected[i]) {
                    for (b1, b2) in planar_segments(&projected[j]) {
                        let Some(hit) = intersect(a1, a2, b1, b2) else {
                            continue;
                        };
                        if self.record(hit, &[route_a.name.as_str(), route_b.name.as_str()], None) {
                            self.index
                                .entry(&route_a.id)
                                .cables_crossed
                                .insert(route_b.name.clone());
                            self.index
                                .entry(&route_b.id)
                                .cables_crossed
                                .insert(route_a.name.clone());
                        }
                    }
                }
            }
        }
    }

    /// Every route segment against every boundary segment of any layer.
    pub fn boundary_pass(&mut self, routes: &[Route], boundaries: &[BoundarySegment]) {
        let projected_boundaries: Vec<_> = boundaries
            .iter()
            .filter_map(|segment| {
                let start = self.projection.project(segment.start)?;
                let end = self.projection.project(segment.end)?;
                Some((segment, start, end))
            })
            .collect();

        for route in routes {
            self.index.entry(&route.id);
            let projected = self.project_route(route);

            for (r1, r2) in planar_segments(&projected) {
                for (segment, b1, b2) in &projected_boundaries {
                    let Some(hit) = intersect(r1, r2, *b1, *b2) else {
                        continue;
                    };
                    let attribution = BoundaryAttribution::from_segment(segment);
                    if self.record(hit, &[route.name.as_str()], Some(attribution)) {
                        self.index
                            .entry(&route.id)
                            .boundaries_crossed
                            .insert(segment.layer.clone());
                    }
                }
            }
        }
    }

    pub fn finish(self) -> Derivation {
        Derivation {
            intersections: self.intersections,
            crossing_index: self.index,
        }
    }

    fn project_route(&self, route: &Route) -> Vec<Option<PlanarPoint>> {
        if route.coordinates.len() < MIN_ROUTE_POINTS {
            debug!(route = %route.id, points = route.coordinates.len(), "route too short, skipped");
            return Vec::new();
        }
        route
            .coordinates
            .points()
            .iter()
            .map(|coordinate| self.projection.project(*coordinate))
            .collect()
    }

    /// Unproject a planar hit and merge it into the markers. Returns false if
    /// the hit cannot be mapped back to a coordinate.
    fn record(
        &mut self,
        hit: PlanarPoint,
        cables: &[&str],
        boundary: Option<BoundaryAttribution>,
    ) -> bool {
        let Some(coordinate) = self.projection.unproject(hit) else {
            debug!(x = hit.x, y = hit.y, "crossing outside projection, dropped");
            return false;
        };

        let projection = self.projection;
        let threshold = self.merge_threshold;
        if let Some(marker) = self
            .intersections
            .iter_mut()
            .find(|marker| projection.distance(marker.coordinate, coordinate) < threshold)
        {
            marker.cables.extend(cables.iter().map(|name| name.to_string()));
            if let Some(attribution) = boundary {
                merge_attribution(marker, attribution);
            }
            return true;
        }

        self.intersections.push(Intersection {
            coordinate,
            cables: cables.iter().map(|name| name.to_string()).collect(),
            boundaries: boundary.into_iter().collect(),
        });
        true
    }
}

/// The newest attribution goes last, so [`Intersection::boundary`] keeps
/// last-write-wins behavior.
fn merge_attribution(marker: &mut Intersection, attribution: BoundaryAttribution) {
    if let Some(position) = marker.boundaries.iter().position(|b| *b == attribution) {
        marker.boundaries.remove(position);
    }
    if marker.boundaries.iter().any(|b| b.layer != attribution.layer) {
        debug!(
            lat = marker.coordinate.lat,
            lng = marker.coordinate.lng,
            layer = %attribution.layer,
            "marker sits on more than one boundary layer"
        );
    }
    marker.boundaries.push(attribution);
}

/// Consecutive projected pairs, skipping pairs with an unprojectable end.
fn planar_segments(
    points: &[Option<PlanarPoint>],
) -> impl Iterator<Item = (PlanarPoint, PlanarPoint)> + '_ {
    points.windows(2).filter_map(|pair| Some((pair[0]?, pair[1]?)))
}
