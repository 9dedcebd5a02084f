//! Road enrichment of an optimized tour.
//!
//! Looks up one road segment per consecutive stop pair. A lookup that fails
//! for any reason is replaced by a straight-line segment at an assumed speed,
//! so the output always has exactly `tour.len() - 1` segments and a provider
//! outage never surfaces as an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::haversine::{DEFAULT_SPEED_KMH, StraightLineEstimator};
use crate::polyline::Polyline;
use crate::solver::Tour;
use crate::traits::{RouteProvider, Stop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentSource {
    /// Geometry and timing came from the routing provider.
    Road,
    /// Synthesized from the haversine distance.
    StraightLine,
}

/// Path between two consecutive tour stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub distance_km: f64,
    pub duration_min: f64,
    /// Starts near the origin stop and ends near the destination stop.
    pub geometry: Polyline,
    /// Turn-by-turn text, in order. Empty for straight-line segments.
    pub instructions: Vec<String>,
    pub source: SegmentSource,
}

impl RouteSegment {
    /// Straight-line stand-in: haversine distance, two-vertex geometry.
    pub fn straight_line(from: (f64, f64), to: (f64, f64), speed_kmh: f64) -> Self {
        let (distance_km, duration_min) = StraightLineEstimator::new(speed_kmh).estimate(from, to);
        Self {
            distance_km,
            duration_min,
            geometry: Polyline::straight(from, to),
            instructions: Vec::new(),
            source: SegmentSource::StraightLine,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SegmentSource::StraightLine
    }
}

#[derive(Debug, Clone)]
pub struct EnrichmentOptions {
    /// Pause between consecutive provider requests (sequential mode only).
    pub pause: Duration,
    /// Speed used for straight-line fallback segments.
    pub fallback_speed_kmh: f64,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            pause: Duration::from_millis(100),
            fallback_speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

/// Enriches the tour one segment at a time, in order, pausing between requests.
pub fn enrich<S, P>(
    tour: &Tour<'_, S>,
    provider: &P,
    options: &EnrichmentOptions,
) -> Vec<RouteSegment>
where
    S: Stop,
    P: RouteProvider,
{
    enrich_locations(&tour.locations(), provider, options, None).unwrap_or_default()
}

/// Like [`enrich`], but checks `cancelled` before every request.
///
/// Returns `None` as soon as the flag is set, which is how a run superseded by
/// a newer optimization is abandoned. Otherwise returns the full segment list.
pub fn enrich_cancellable<S, P>(
    tour: &Tour<'_, S>,
    provider: &P,
    options: &EnrichmentOptions,
    cancelled: &AtomicBool,
) -> Option<Vec<RouteSegment>>
where
    S: Stop,
    P: RouteProvider,
{
    enrich_locations(&tour.locations(), provider, options, Some(cancelled))
}

/// Enriches all segments concurrently on the rayon pool.
///
/// No pause is applied; use against providers without rate limits (e.g. a
/// self-hosted OSRM). Output order and fallback behavior match [`enrich`].
pub fn enrich_parallel<S, P>(
    tour: &Tour<'_, S>,
    provider: &P,
    options: &EnrichmentOptions,
) -> Vec<RouteSegment>
where
    S: Stop,
    P: RouteProvider + Sync,
{
    let locations = tour.locations();
    let segments: Vec<RouteSegment> = locations
        .par_windows(2)
        .enumerate()
        .map(|(index, pair)| segment_or_fallback(provider, index, pair[0], pair[1], options))
        .collect();
    log_summary(&segments);
    segments
}

fn enrich_locations<P: RouteProvider>(
    locations: &[(f64, f64)],
    provider: &P,
    options: &EnrichmentOptions,
    cancelled: Option<&AtomicBool>,
) -> Option<Vec<RouteSegment>> {
    if locations.len() < 2 {
        return Some(Vec::new());
    }

    let mut segments = Vec::with_capacity(locations.len() - 1);
    for (index, pair) in locations.windows(2).enumerate() {
        if cancelled.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            info!(completed = index, "enrichment cancelled");
            return None;
        }
        if index > 0 && !options.pause.is_zero() {
            thread::sleep(options.pause);
        }
        segments.push(segment_or_fallback(provider, index, pair[0], pair[1], options));
    }

    log_summary(&segments);
    Some(segments)
}

fn segment_or_fallback<P: RouteProvider + ?Sized>(
    provider: &P,
    index: usize,
    from: (f64, f64),
    to: (f64, f64),
    options: &EnrichmentOptions,
) -> RouteSegment {
    match provider.route_between(from, to) {
        Ok(segment) => segment,
        Err(err) => {
            warn!(segment = index, error = %err, "road lookup failed, using straight line");
            RouteSegment::straight_line(from, to, options.fallback_speed_kmh)
        }
    }
}

fn log_summary(segments: &[RouteSegment]) {
    let fallbacks = segments.iter().filter(|segment| segment.is_fallback()).count();
    info!(segments = segments.len(), fallbacks, "enrichment finished");
}
