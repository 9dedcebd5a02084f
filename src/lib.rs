//! collection-router core
//!
//! Urgency-aware tour optimization for waste-collection points, with
//! best-effort road enrichment and a navigation projector for playback.

pub mod traits;
pub mod model;
pub mod error;
pub mod haversine;
pub mod cost;
pub mod solver;
pub mod local_search;
pub mod annealing;
pub mod polyline;
pub mod osrm;
pub mod enrichment;
pub mod navigation;
