//! 2-opt improvement over a whole tour.
//!
//! Reverses the sub-sequence `[i..=j]` (the first stop never moves) and keeps
//! the reversal if it strictly lowers [`route_cost`]. After every accepted
//! move the scan restarts from the beginning (first-improvement strategy).
//!
//! Unlike a pure distance 2-opt, the urgency penalty depends on every
//! position inside the reversed block, so each candidate is re-costed in full
//! rather than through an edge delta.

use crate::cost::{CostWeights, route_cost};
use crate::solver::Tour;
use crate::traits::Stop;

/// Runs 2-opt until a full scan finds nothing, or `max_iterations` improvements
/// have been accepted. Tours of two stops or fewer are returned unchanged.
pub fn two_opt<'a, S: Stop>(
    tour: Tour<'a, S>,
    weights: &CostWeights,
    max_iterations: usize,
) -> Tour<'a, S> {
    if tour.len() <= 2 {
        return tour;
    }

    let mut best = tour.into_stops();
    let mut best_cost = route_cost(&best, weights);

    for _ in 0..max_iterations {
        match first_improvement(&best, best_cost, weights) {
            Some((candidate, cost)) => {
                best = candidate;
                best_cost = cost;
            }
            None => break,
        }
    }

    Tour::new(best)
}

/// Scans `(i, j)` pairs in order and returns the first strictly better reversal.
fn first_improvement<'a, S: Stop>(
    stops: &[&'a S],
    current_cost: f64,
    weights: &CostWeights,
) -> Option<(Vec<&'a S>, f64)> {
    let n = stops.len();
    let mut candidate = stops.to_vec();

    for i in 1..n - 1 {
        for j in i + 1..n {
            candidate[i..=j].reverse();
            let cost = route_cost(&candidate, weights);
            if cost < current_cost {
                return Some((candidate, cost));
            }
            // Undo in place instead of cloning per candidate.
            candidate[i..=j].reverse();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServicePoint;

    fn point(id: &str, lat: f64, lng: f64, fill: f64) -> ServicePoint {
        ServicePoint::new(id, id, "Pune", (lat, lng), fill)
    }

    fn ids(tour: &Tour<'_, ServicePoint>) -> Vec<String> {
        tour.ids()
    }

    #[test]
    fn short_tours_are_untouched() {
        let points = vec![point("b", 0.0, 0.02, 10.0), point("a", 0.0, 0.0, 10.0)];
        let tour = Tour::new(points.iter().collect());
        let result = two_opt(tour, &CostWeights::default(), 100);
        assert_eq!(ids(&result), vec!["b", "a"]);
    }

    #[test]
    fn uncrosses_a_zigzag() {
        // Points on a line visited out of order: 0, 2, 1, 3.
        let points = vec![
            point("p0", 0.0, 0.00, 0.0),
            point("p2", 0.0, 0.02, 0.0),
            point("p1", 0.0, 0.01, 0.0),
            point("p3", 0.0, 0.03, 0.0),
        ];
        let tour = Tour::new(points.iter().collect());
        let result = two_opt(tour, &CostWeights::default(), 100);
        assert_eq!(ids(&result), vec!["p0", "p1", "p2", "p3"]);
    }

    #[test]
    fn first_stop_never_moves() {
        let points = vec![
            point("start", 0.0, 0.05, 0.0),
            point("a", 0.0, 0.00, 0.0),
            point("b", 0.0, 0.01, 0.0),
            point("c", 0.0, 0.02, 0.0),
        ];
        let tour = Tour::new(points.iter().collect());
        let result = two_opt(tour, &CostWeights::default(), 100);
        assert_eq!(ids(&result)[0], "start");
    }

    #[test]
    fn never_increases_cost() {
        let points = vec![
            point("a", 18.5204, 73.8567, 90.0),
            point("b", 18.5598, 73.7775, 20.0),
            point("c", 18.5089, 73.9260, 70.0),
            point("d", 18.5916, 73.7309, 40.0),
            point("e", 18.5362, 73.8958, 65.0),
        ];
        let weights = CostWeights::default();
        let tour = Tour::new(points.iter().collect());
        let before = tour.cost(&weights);
        let after = two_opt(tour, &weights, 100).cost(&weights);
        assert!(after <= before);
    }

    #[test]
    fn zero_iterations_is_identity() {
        let points = vec![
            point("p0", 0.0, 0.00, 0.0),
            point("p2", 0.0, 0.02, 0.0),
            point("p1", 0.0, 0.01, 0.0),
        ];
        let tour = Tour::new(points.iter().collect());
        let result = two_opt(tour, &CostWeights::default(), 0);
        assert_eq!(ids(&result), vec!["p0", "p2", "p1"]);
    }

    #[test]
    fn improvement_cap_limits_accepted_reversals() {
        // Line positions visited as 0, 4, 1, 3, 2, 5.
        let points = vec![
            point("p0", 0.0, 0.00, 0.0),
            point("p4", 0.0, 0.04, 0.0),
            point("p1", 0.0, 0.01, 0.0),
            point("p3", 0.0, 0.03, 0.0),
            point("p2", 0.0, 0.02, 0.0),
            point("p5", 0.0, 0.05, 0.0),
        ];
        let weights = CostWeights::default();

        let once = two_opt(Tour::new(points.iter().collect()), &weights, 1);
        assert_eq!(ids(&once), vec!["p0", "p1", "p4", "p3", "p2", "p5"]);

        let full = two_opt(Tour::new(points.iter().collect()), &weights, 100);
        assert_eq!(ids(&full), vec!["p0", "p1", "p2", "p3", "p4", "p5"]);
        assert!(full.cost(&weights) < once.cost(&weights));
    }
}
