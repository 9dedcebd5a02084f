//! OSRM HTTP adapter for road segments.
//!
//! Talks to the `route` service: one request per origin/destination pair,
//! full-overview GeoJSON geometry and per-step maneuvers.

use std::env;

use serde::Deserialize;
use tracing::debug;

use crate::enrichment::{RouteSegment, SegmentSource};
use crate::error::RoutingError;
use crate::polyline::Polyline;
use crate::traits::RouteProvider;

const SUCCESS_CODE: &str = "Ok";

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Defaults overridden by `OSRM_BASE_URL`, `OSRM_PROFILE` and
    /// `OSRM_TIMEOUT_SECS` where set. Unparsable timeouts are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`OsrmConfig::from_env`], reading variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup("OSRM_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(profile) = lookup("OSRM_PROFILE") {
            config.profile = profile;
        }
        if let Some(timeout) = lookup("OSRM_TIMEOUT_SECS").and_then(|value| value.parse().ok()) {
            config.timeout_secs = timeout;
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&steps=true",
            self.config.base_url, self.config.profile, from.1, from.0, to.1, to.0
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route_between(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<RouteSegment, RoutingError> {
        let url = self.route_url(from, to);
        debug!(%url, "requesting OSRM route");

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmRouteResponse>()?;

        body.into_segment()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// (longitude, latitude) pairs.
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    #[serde(default)]
    name: String,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: Option<String>,
    modifier: Option<String>,
    instruction: Option<String>,
}

impl OsrmRouteResponse {
    /// Maps the first route candidate into a segment.
    pub(crate) fn into_segment(self) -> Result<RouteSegment, RoutingError> {
        if self.code != SUCCESS_CODE {
            return Err(RoutingError::Status(self.code));
        }
        let route = self.routes.into_iter().next().ok_or(RoutingError::NoRoutes)?;

        let geometry = Polyline::from_lng_lat(&route.geometry.coordinates);
        if geometry.len() < 2 {
            return Err(RoutingError::DegenerateGeometry(geometry.len()));
        }

        let instructions = route
            .legs
            .iter()
            .flat_map(|leg| leg.steps.iter())
            .filter_map(describe)
            .collect();

        Ok(RouteSegment {
            distance_km: route.distance / 1000.0,
            duration_min: route.duration / 60.0,
            geometry,
            instructions,
            source: SegmentSource::Road,
        })
    }
}

/// Provider text when present, otherwise a sentence built from the maneuver.
fn describe(step: &OsrmStep) -> Option<String> {
    let maneuver = &step.maneuver;
    if let Some(text) = maneuver.instruction.as_ref().filter(|text| !text.is_empty()) {
        return Some(text.clone());
    }

    let kind = maneuver.kind.as_deref()?;
    let modifier = maneuver.modifier.as_deref();
    let action = match (kind, modifier) {
        ("arrive", _) => return Some("Arrive at destination".to_string()),
        ("depart", _) => "Depart".to_string(),
        ("roundabout" | "rotary", _) => "Enter the roundabout".to_string(),
        ("fork", Some(side)) => format!("Keep {}", side),
        ("turn" | "end of road", Some(side)) => format!("Turn {}", side),
        ("continue" | "new name", Some(side)) => format!("Continue {}", side),
        ("continue" | "new name", None) => "Continue".to_string(),
        (other, Some(side)) => format!("{} {}", capitalize(other), side),
        (other, None) => capitalize(other),
    };

    if step.name.is_empty() {
        Some(action)
    } else {
        Some(format!("{} onto {}", action, step.name))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
