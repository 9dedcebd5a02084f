//! Collection-point data model.

use serde::{Deserialize, Serialize};

use crate::traits::Stop;

/// Fill level at or above which a point is critical.
pub const CRITICAL_FILL: f64 = 80.0;

/// Fill level at or above which a point needs attention soon.
pub const WARNING_FILL: f64 = 60.0;

const DEFAULT_CAPACITY_LITERS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStatus {
    Normal,
    Warning,
    Critical,
}

impl FillStatus {
    pub fn from_fill(fill_percentage: f64) -> Self {
        if fill_percentage >= CRITICAL_FILL {
            FillStatus::Critical
        } else if fill_percentage >= WARNING_FILL {
            FillStatus::Warning
        } else {
            FillStatus::Normal
        }
    }
}

/// A waste-collection point as seen by one optimization run.
///
/// Built once from ingested data and never mutated afterwards; the optimizer
/// only ever holds references to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePoint {
    pub id: String,
    pub name: String,
    /// Human-readable location, e.g. "FC Road, Pune".
    pub location_label: String,
    /// (latitude, longitude) in degrees.
    pub coordinates: (f64, f64),
    /// Fill level in [0, 100].
    pub fill_percentage: f64,
    pub capacity_liters: u32,
    /// Last sensor update (unix milliseconds).
    pub last_updated: i64,
}

impl ServicePoint {
    /// Creates a point, clamping the fill level into [0, 100].
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location_label: impl Into<String>,
        coordinates: (f64, f64),
        fill_percentage: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location_label: location_label.into(),
            coordinates,
            fill_percentage: fill_percentage.clamp(0.0, 100.0),
            capacity_liters: DEFAULT_CAPACITY_LITERS,
            last_updated: 0,
        }
    }

    pub fn with_capacity(mut self, liters: u32) -> Self {
        self.capacity_liters = liters;
        self
    }

    pub fn with_last_updated(mut self, unix_millis: i64) -> Self {
        self.last_updated = unix_millis;
        self
    }

    pub fn status(&self) -> FillStatus {
        FillStatus::from_fill(self.fill_percentage)
    }
}

impl Stop for ServicePoint {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn location(&self) -> (f64, f64) {
        self.coordinates
    }

    fn urgency(&self) -> f64 {
        self.fill_percentage
    }
}

/// Headline numbers over a candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FleetSummary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub average_fill: f64,
}

impl FleetSummary {
    pub fn of(points: &[ServicePoint]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let mut summary = Self {
            total: points.len(),
            ..Self::default()
        };
        let mut fill_sum = 0.0;
        for point in points {
            match point.status() {
                FillStatus::Critical => summary.critical += 1,
                FillStatus::Warning => summary.warning += 1,
                FillStatus::Normal => {}
            }
            fill_sum += point.fill_percentage;
        }
        summary.average_fill = fill_sum / points.len() as f64;
        summary
    }
}
