//! Cable routes and the active route set.

use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, WaypointInput, normalize_waypoints};
use crate::error::RouteError;
use crate::polyline::Polyline;

/// Minimum number of points that make a drawable cable.
pub const MIN_ROUTE_POINTS: usize = 2;

/// A cable as submitted by the add-cable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInput {
    pub id: String,
    pub system_name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub waypoints: Vec<WaypointInput>,
}

/// A normalized cable system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub coordinates: Polyline,
    /// Aligned with `coordinates`; entry `i` names the segment ending at
    /// point `i`, so entry 0 is always `None`.
    pub segment_names: Vec<Option<String>>,
    pub owner: Option<String>,
    pub color: Option<String>,
}

impl Route {
    /// Validate and normalize form input.
    pub fn from_input(input: RouteInput) -> Result<Self, RouteError> {
        let name = input.system_name.trim();
        if name.is_empty() {
            return Err(RouteError::MissingName);
        }
        if input.waypoints.len() < MIN_ROUTE_POINTS {
            return Err(RouteError::MissingVertices {
                route: name.to_string(),
                count: input.waypoints.len(),
            });
        }

        let coordinates = normalize_waypoints(&input.waypoints).map_err(|(index, axis, source)| {
            RouteError::InvalidCoordinate {
                route: name.to_string(),
                point: index + 1,
                axis,
                source,
            }
        })?;

        let segment_names = input
            .waypoints
            .iter()
            .enumerate()
            .map(|(index, waypoint)| {
                waypoint
                    .segment_name
                    .as_ref()
                    .filter(|name| index > 0 && !name.is_empty())
                    .cloned()
            })
            .collect();

        Ok(Self {
            id: input.id,
            name: name.to_string(),
            coordinates: Polyline::new(coordinates),
            segment_names,
            owner: input.owner.filter(|owner| !owner.is_empty()),
            color: input.color,
        })
    }

    /// Build a route from already-numeric coordinates. No validation.
    pub fn from_coordinates(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Vec<Coordinate>,
    ) -> Self {
        let segment_names = vec![None; coordinates.len()];
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: Polyline::new(coordinates),
            segment_names,
            owner: None,
            color: None,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.coordinates.segments()
    }

    /// Name of the segment ending at point `index`.
    pub fn segment_name(&self, index: usize) -> Option<&str> {
        self.segment_names.get(index).and_then(|name| name.as_deref())
    }
}

/// The routes currently shown on the map.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and admit a route. Nothing is admitted on error.
    pub fn add(&mut self, input: RouteInput) -> Result<&Route, RouteError> {
        let route = Route::from_input(input)?;
        self.insert(route)
    }

    pub fn insert(&mut self, route: Route) -> Result<&Route, RouteError> {
        if self.get(&route.id).is_some() {
            return Err(RouteError::DuplicateId(route.id));
        }
        self.routes.push(route);
        Ok(&self.routes[self.routes.len() - 1])
    }

    pub fn remove(&mut self, id: &str) -> Option<Route> {
        let index = self.routes.iter().position(|route| route.id == id)?;
        Some(self.routes.remove(index))
    }

    /// Remove every route with the given display name. Returns how many
    /// were removed.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let before = self.routes.len();
        self.routes.retain(|route| route.name != name);
        before - self.routes.len()
    }

    pub fn get(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
