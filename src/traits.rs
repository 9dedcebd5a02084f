//! Core domain traits for the collection router.
//!
//! These are intentionally minimal. The optimizer only needs a position and an
//! urgency per stop, and enrichment only needs something that can answer
//! "how do I drive from here to there".

use std::hash::Hash;

use crate::enrichment::RouteSegment;
use crate::error::RoutingError;

/// Unique identifier for routed entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A stop is a single point the tour must visit exactly once.
pub trait Stop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location coordinates (lat, lng) in degrees.
    fn location(&self) -> (f64, f64);

    /// Urgency signal in [0, 100]; higher means the stop should be served earlier.
    fn urgency(&self) -> f64;
}

/// Provides real-world path geometry and timing between two coordinates.
///
/// Implementations report failures as errors; turning them into a usable
/// segment is the caller's job (see [`crate::enrichment`]).
pub trait RouteProvider {
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<RouteSegment, RoutingError>;
}
