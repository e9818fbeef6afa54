//! cable-crossings geometry engine
//!
//! Normalizes operator-entered cable waypoints and finds where cable routes
//! cross each other and maritime jurisdiction boundaries.

pub mod aggregator;
pub mod boundary;
pub mod coordinate;
pub mod error;
pub mod haversine;
pub mod polyline;
pub mod projection;
pub mod route;
pub mod segment;
pub mod session;
pub mod source;
pub mod traits;
