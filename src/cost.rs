//! Tour cost: travelled distance plus an urgency-position penalty.
//!
//! ```text
//! cost = sum(haversine(stop[i-1], stop[i])) + priority_weight * sum((urgency[i] / 100) * (i + 1))
//! ```
//!
//! The penalty grows with how late in the tour an urgent stop is served, so
//! lower cost means both shorter and more urgency-respecting.

use crate::haversine::haversine_km;
use crate::traits::Stop;

/// Empirical weighting constants shared by construction and cost evaluation.
///
/// None of these are derived; they are kept configurable rather than tuned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    /// Multiplier applied to urgency when scoring the next stop.
    pub urgency_multiplier: f64,
    /// Multiplier applied to distance in the next-stop score denominator.
    pub distance_penalty: f64,
    /// Added to the score denominator so co-located stops don't divide by zero.
    pub epsilon: f64,
    /// Weight of the urgency-position penalty in the tour cost.
    pub priority_weight: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            urgency_multiplier: 2.5,
            distance_penalty: 0.5,
            epsilon: 0.1,
            priority_weight: 0.1,
        }
    }
}

impl CostWeights {
    /// Score of moving to a candidate `distance_km` away; higher is better.
    pub fn next_stop_score(&self, urgency: f64, distance_km: f64) -> f64 {
        (urgency * self.urgency_multiplier) / (distance_km * self.distance_penalty + self.epsilon)
    }
}

/// Total travelled distance in km along the stops, in order.
pub fn tour_distance<S: Stop>(stops: &[&S]) -> f64 {
    stops
        .windows(2)
        .map(|pair| haversine_km(pair[0].location(), pair[1].location()))
        .sum()
}

/// Cost of visiting `stops` in order. Empty and single-stop sequences cost 0.
pub fn route_cost<S: Stop>(stops: &[&S], weights: &CostWeights) -> f64 {
    if stops.len() < 2 {
        return 0.0;
    }

    let priority_penalty: f64 = stops
        .iter()
        .enumerate()
        .map(|(position, stop)| (stop.urgency() / 100.0) * (position + 1) as f64)
        .sum();

    tour_distance(stops) + priority_penalty * weights.priority_weight
}
