//! Polyline representation for segment geometries.
//!
//! Stored as decoded (latitude, longitude) vertices. Providers that speak
//! (longitude, latitude) convert at the boundary (see [`crate::osrm`]).

use serde::{Deserialize, Serialize};

/// Ordered path geometry from a segment's origin to its destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a polyline from (latitude, longitude) vertices.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Two-vertex straight line between endpoints.
    pub fn straight(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            points: vec![from, to],
        }
    }

    /// Builds a polyline from (longitude, latitude) pairs, swapping each.
    pub fn from_lng_lat(coordinates: &[[f64; 2]]) -> Self {
        Self {
            points: coordinates.iter().map(|&[lng, lat]| (lat, lng)).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    /// Vertex `steps` positions after the first, clamped to the last vertex.
    pub fn look_ahead(&self, steps: usize) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let index = steps.min(self.points.len() - 1);
        Some(self.points[index])
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}
