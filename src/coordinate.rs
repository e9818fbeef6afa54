//! Degree/direction input normalization.
//!
//! Operators type coordinates as an unsigned magnitude (`DDD.DDDD`) plus a
//! hemisphere letter. Latitudes map directly onto a signed value. A western
//! longitude is ambiguous: `10.0000 W` is either -10 or 350 depending on
//! which way the cable is heading, so it is resolved against the previous
//! vertex of the same route.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

static DEGREES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{4}$").unwrap_or_else(|err| panic!("degree pattern: {err}"))
});

/// Largest magnitude accepted on either axis.
const MAX_DEGREES: f64 = 180.0;

/// A normalized vertex in degrees.
///
/// `lng` is not wrapped: after disambiguation it lies in (-360, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Builds a coordinate from a `(lat, lng)` tuple.
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatHemisphere {
    N,
    S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LngHemisphere {
    E,
    W,
}

impl FromStr for LatHemisphere {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(LatHemisphere::N),
            "S" => Ok(LatHemisphere::S),
            other => Err(CoordinateError::InvalidDirection {
                value: other.to_string(),
                axis: Axis::Latitude,
            }),
        }
    }
}

impl FromStr for LngHemisphere {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => Ok(LngHemisphere::E),
            "W" => Ok(LngHemisphere::W),
            other => Err(CoordinateError::InvalidDirection {
                value: other.to_string(),
                axis: Axis::Longitude,
            }),
        }
    }
}

/// One vertex as entered in the add-cable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointInput {
    pub lat_deg: String,
    pub lat_dir: LatHemisphere,
    pub lng_deg: String,
    pub lng_dir: LngHemisphere,
    /// Name of the segment ending at this point. Ignored on the first point.
    #[serde(default)]
    pub segment_name: Option<String>,
}

impl WaypointInput {
    pub fn new(
        lat_deg: impl Into<String>,
        lat_dir: LatHemisphere,
        lng_deg: impl Into<String>,
        lng_dir: LngHemisphere,
    ) -> Self {
        Self {
            lat_deg: lat_deg.into(),
            lat_dir,
            lng_deg: lng_deg.into(),
            lng_dir,
            segment_name: None,
        }
    }

    pub fn with_segment_name(mut self, name: impl Into<String>) -> Self {
        self.segment_name = Some(name.into());
        self
    }
}

/// Parse an unsigned `DDD.DDDD` magnitude.
///
/// One to three integer digits, exactly four fractional digits, value in
/// [0, 180].
pub fn parse_degrees(value: &str) -> Result<f64, CoordinateError> {
    let invalid = || CoordinateError::InvalidFormat {
        value: value.to_string(),
    };

    if !DEGREES.is_match(value) {
        return Err(invalid());
    }
    let degrees: f64 = value.parse().map_err(|_| invalid())?;
    if !(0.0..=MAX_DEGREES).contains(&degrees) {
        return Err(invalid());
    }

    Ok(degrees)
}

pub fn normalize_latitude(value: &str, dir: LatHemisphere) -> Result<f64, CoordinateError> {
    let degrees = parse_degrees(value)?;
    Ok(match dir {
        LatHemisphere::N => degrees,
        LatHemisphere::S => -degrees,
    })
}

/// Normalize a longitude, using `prev_lng` (the previous vertex of the same
/// route) to pick a side of the antimeridian for western values.
pub fn normalize_longitude(
    value: &str,
    dir: LngHemisphere,
    prev_lng: Option<f64>,
) -> Result<f64, CoordinateError> {
    let degrees = parse_degrees(value)?;
    Ok(match dir {
        LngHemisphere::E => degrees,
        LngHemisphere::W => resolve_west_longitude(degrees, prev_lng),
    })
}

/// Choose between `-degrees` and `360 - degrees` for a western magnitude.
///
/// Without a previous vertex the short way (`-degrees`) wins. Otherwise the
/// candidate closer to `prev_lng` wins; equal distances go to `360 - degrees`.
pub fn resolve_west_longitude(degrees: f64, prev_lng: Option<f64>) -> f64 {
    let short_way = -degrees;
    let long_way = 360.0 - degrees;

    match prev_lng {
        None => short_way,
        Some(prev) => {
            if (prev - short_way).abs() < (prev - long_way).abs() {
                short_way
            } else {
                long_way
            }
        }
    }
}

/// Normalize a route's waypoints in order.
///
/// Fails on the first invalid vertex with its 0-based index; latitude is
/// checked before longitude.
pub fn normalize_waypoints(
    waypoints: &[WaypointInput],
) -> Result<Vec<Coordinate>, (usize, Axis, CoordinateError)> {
    let mut coordinates = Vec::with_capacity(waypoints.len());
    let mut prev_lng = None;

    for (index, waypoint) in waypoints.iter().enumerate() {
        let lat = normalize_latitude(&waypoint.lat_deg, waypoint.lat_dir)
            .map_err(|err| (index, Axis::Latitude, err))?;
        let lng = normalize_longitude(&waypoint.lng_deg, waypoint.lng_dir, prev_lng)
            .map_err(|err| (index, Axis::Longitude, err))?;

        coordinates.push(Coordinate::new(lat, lng));
        prev_lng = Some(lng);
    }

    Ok(coordinates)
}
