//! Pune collection areas used across integration tests.
//!
//! Area centres are real neighbourhood coordinates; points are placed at
//! small fixed offsets from them so clusters stay deterministic.

#![allow(dead_code)]

use collection_router::model::ServicePoint;

/// A named area with coordinates.
#[derive(Debug, Clone)]
pub struct Area {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Area {
    pub const fn new(id: &'static str, name: &'static str, lat: f64, lng: f64) -> Self {
        Self { id, name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// A collection point in this area, offset by (dlat, dlng) degrees.
    pub fn point(&self, suffix: usize, fill: f64, offset: (f64, f64)) -> ServicePoint {
        ServicePoint::new(
            format!("{}-{}", self.id, suffix),
            format!("{} Dustbin {}", self.name, suffix),
            format!("{}, Pune", self.name),
            (self.lat + offset.0, self.lng + offset.1),
            fill,
        )
    }
}

pub const AREAS: &[Area] = &[
    Area::new("fc-road", "FC Road", 18.5204, 73.8567),
    Area::new("shivajinagar", "Shivajinagar", 18.5304, 73.8446),
    Area::new("koregaon-park", "Koregaon Park", 18.5362, 73.8958),
    Area::new("kothrud", "Kothrud", 18.5074, 73.8077),
    Area::new("baner", "Baner", 18.5598, 73.7775),
    Area::new("hadapsar", "Hadapsar", 18.5089, 73.9260),
    Area::new("wakad", "Wakad", 18.5975, 73.7649),
    Area::new("viman-nagar", "Viman Nagar", 18.5679, 73.9143),
    Area::new("hinjewadi", "Hinjewadi", 18.5916, 73.7309),
    Area::new("aundh", "Aundh", 18.5642, 73.8069),
];

pub fn area(id: &str) -> &'static Area {
    AREAS
        .iter()
        .find(|area| area.id == id)
        .unwrap_or_else(|| panic!("unknown area {}", id))
}

/// One point per area with a spread of fill levels.
pub fn city_wide() -> Vec<ServicePoint> {
    const FILLS: [f64; 10] = [82.5, 14.0, 67.3, 45.1, 91.8, 8.9, 59.9, 73.0, 30.4, 50.0];
    AREAS
        .iter()
        .zip(FILLS)
        .enumerate()
        .map(|(i, (area, fill))| area.point(i + 1, fill, (0.001 * i as f64, -0.0015 * i as f64)))
        .collect()
}
