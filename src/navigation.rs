//! Per-step navigation data for presenting a finished tour.
//!
//! Step `i` describes the drive from stop `i - 1` to stop `i`; step 0 is the
//! starting stop and has no travel. Every accessor accepts any index, including
//! `tour.len()` (playback finished), and returns zero/empty values where no
//! travel exists. Segments may be missing while enrichment is still running,
//! in which case values fall back to the straight line between stops.

use std::fmt;

use serde::Serialize;

use crate::enrichment::RouteSegment;
use crate::haversine::{StraightLineEstimator, haversine_km};
use crate::solver::Tour;
use crate::traits::Stop;

/// How many polyline vertices ahead of the first one the bearing looks.
const BEARING_LOOK_AHEAD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

const COMPASS: [Direction; 8] = [
    Direction::N,
    Direction::NE,
    Direction::E,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
];

impl Direction {
    /// Nearest of the eight compass points to a bearing in degrees.
    pub fn from_bearing(bearing: f64) -> Self {
        let sector = ((bearing / 45.0).round() as i64).rem_euclid(8);
        COMPASS[sector as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playback state of a stop relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopState {
    Completed,
    Current,
    Pending,
}

impl StopState {
    pub fn at(index: usize, current_step: usize) -> Self {
        if index < current_step {
            StopState::Completed
        } else if index == current_step {
            StopState::Current
        } else {
            StopState::Pending
        }
    }
}

/// Forward azimuth from `from` to `to`, degrees clockwise from north in [0, 360).
pub fn bearing_deg(from: (f64, f64), to: (f64, f64)) -> f64 {
    let lat1 = from.0.to_radians();
    let lat2 = to.0.to_radians();
    let delta_lng = (to.1 - from.1).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if bearing >= 360.0 { 0.0 } else { bearing }
}

/// "N min" under an hour, "Hh Mm" otherwise. Rounds to whole minutes first.
pub fn format_eta(minutes: f64) -> String {
    let total = minutes.round().max(0.0) as u64;
    if total < 60 {
        format!("{} min", total)
    } else {
        format!("{}h {}m", total / 60, total % 60)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationStep {
    pub index: usize,
    pub distance_km: f64,
    pub bearing_deg: f64,
    pub direction: Direction,
    pub duration_min: f64,
    pub eta: String,
    pub instructions: Vec<String>,
}

/// Read-only view over a tour and its enriched segments.
#[derive(Debug)]
pub struct NavigationProjector<'t, 'a, S> {
    tour: &'t Tour<'a, S>,
    segments: &'t [RouteSegment],
    estimator: StraightLineEstimator,
}

impl<'t, 'a, S: Stop> NavigationProjector<'t, 'a, S> {
    pub fn new(tour: &'t Tour<'a, S>, segments: &'t [RouteSegment]) -> Self {
        Self {
            tour,
            segments,
            estimator: StraightLineEstimator::default(),
        }
    }

    /// Speed used to estimate durations for steps without a segment.
    pub fn with_fallback_speed(mut self, speed_kmh: f64) -> Self {
        self.estimator = StraightLineEstimator::new(speed_kmh);
        self
    }

    pub fn len(&self) -> usize {
        self.tour.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    fn has_travel(&self, index: usize) -> bool {
        index > 0 && index < self.tour.len()
    }

    fn segment(&self, index: usize) -> Option<&'t RouteSegment> {
        let segments: &'t [RouteSegment] = self.segments;
        if self.has_travel(index) {
            segments.get(index - 1)
        } else {
            None
        }
    }

    /// Endpoints of the straight leg into stop `index`.
    fn leg(&self, index: usize) -> Option<((f64, f64), (f64, f64))> {
        if !self.has_travel(index) {
            return None;
        }
        let from = self.tour.get(index - 1)?.location();
        let to = self.tour.get(index)?.location();
        Some((from, to))
    }

    pub fn distance_km(&self, index: usize) -> f64 {
        if let Some(segment) = self.segment(index) {
            return segment.distance_km;
        }
        self.leg(index)
            .map(|(from, to)| haversine_km(from, to))
            .unwrap_or(0.0)
    }

    pub fn duration_min(&self, index: usize) -> f64 {
        match self.segment(index) {
            Some(segment) => segment.duration_min,
            None => self.estimator.minutes_for_km(self.distance_km(index)),
        }
    }

    /// Heading at the start of step `index`.
    ///
    /// Uses the road geometry a few vertices in when available, since the
    /// first stretch of road says more about where to drive than the straight
    /// line to the destination.
    pub fn bearing_deg(&self, index: usize) -> f64 {
        let road_heading = self.segment(index).and_then(|segment| {
            if segment.geometry.len() < 2 {
                return None;
            }
            let from = segment.geometry.first()?;
            let to = segment.geometry.look_ahead(BEARING_LOOK_AHEAD)?;
            Some(bearing_deg(from, to))
        });

        road_heading
            .or_else(|| self.leg(index).map(|(from, to)| bearing_deg(from, to)))
            .unwrap_or(0.0)
    }

    pub fn direction(&self, index: usize) -> Direction {
        Direction::from_bearing(self.bearing_deg(index))
    }

    pub fn eta(&self, index: usize) -> String {
        format_eta(self.duration_min(index))
    }

    pub fn instructions(&self, index: usize) -> &'t [String] {
        self.segment(index)
            .map(|segment| segment.instructions.as_slice())
            .unwrap_or(&[])
    }

    /// All values for one stop; `None` past the last stop.
    pub fn step(&self, index: usize) -> Option<NavigationStep> {
        if index >= self.tour.len() {
            return None;
        }
        Some(NavigationStep {
            index,
            distance_km: self.distance_km(index),
            bearing_deg: self.bearing_deg(index),
            direction: self.direction(index),
            duration_min: self.duration_min(index),
            eta: self.eta(index),
            instructions: self.instructions(index).to_vec(),
        })
    }

    pub fn steps(&self) -> Vec<NavigationStep> {
        (0..self.tour.len()).filter_map(|index| self.step(index)).collect()
    }

    /// Geometry to draw for step `index`.
    ///
    /// Step 0 is the lone starting vertex; later steps use the road geometry
    /// when present and the straight line otherwise. Empty past the end.
    pub fn path_for_step(&self, index: usize) -> Vec<(f64, f64)> {
        if index == 0 {
            return self.tour.get(0).map(|stop| vec![stop.location()]).unwrap_or_default();
        }
        if let Some(segment) = self.segment(index).filter(|segment| !segment.geometry.is_empty()) {
            return segment.geometry.points().to_vec();
        }
        self.leg(index)
            .map(|(from, to)| vec![from, to])
            .unwrap_or_default()
    }

    pub fn total_distance_km(&self) -> f64 {
        (0..self.tour.len()).map(|index| self.distance_km(index)).sum()
    }

    /// Sum of segment durations, or total distance at the fallback speed when
    /// no segment carries any duration.
    pub fn total_duration_min(&self) -> f64 {
        let road: f64 = self.segments.iter().map(|segment| segment.duration_min).sum();
        if road > 0.0 {
            road
        } else {
            self.estimator.minutes_for_km(self.total_distance_km())
        }
    }

    pub fn total_eta(&self) -> String {
        format_eta(self.total_duration_min())
    }
}
