//! Simulated annealing over swap moves.
//!
//! Each iteration swaps two random positions (never position 0), accepts the
//! move if it is better or with probability `exp(-delta / T)` otherwise, and
//! cools `T` geometrically. The best tour seen is tracked separately from the
//! random walk and returned, so the result is never worse than the input.

use rand::Rng;

use crate::cost::{CostWeights, route_cost};
use crate::solver::Tour;
use crate::traits::Stop;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingSchedule {
    pub initial_temperature: f64,
    /// Multiplier applied to the temperature after every iteration.
    pub cooling_rate: f64,
    /// The walk stops once the temperature drops to this value.
    pub min_temperature: f64,
    pub max_iterations: usize,
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            min_temperature: 0.1,
            max_iterations: 200,
        }
    }
}

impl AnnealingSchedule {
    pub fn new(initial_temperature: f64, cooling_rate: f64) -> Self {
        Self {
            initial_temperature,
            cooling_rate,
            ..Self::default()
        }
    }
}

struct Best<'a, S> {
    stops: Vec<&'a S>,
    cost: f64,
}

/// Anneals `tour` using `rng` as the only source of randomness.
///
/// Tours with fewer than three stops have nothing to swap and are returned
/// without touching `rng`.
pub fn anneal<'a, S, R>(
    tour: Tour<'a, S>,
    weights: &CostWeights,
    schedule: &AnnealingSchedule,
    rng: &mut R,
) -> Tour<'a, S>
where
    S: Stop,
    R: Rng,
{
    let n = tour.len();
    if n <= 2 {
        return tour;
    }

    let mut current = tour.into_stops();
    let mut current_cost = route_cost(&current, weights);
    let mut best = Best {
        stops: current.clone(),
        cost: current_cost,
    };

    let mut temperature = schedule.initial_temperature;
    let mut iterations = 0;

    while temperature > schedule.min_temperature && iterations < schedule.max_iterations {
        iterations += 1;

        let i = rng.random_range(1..n);
        let j = rng.random_range(i..n);

        let mut candidate = current.clone();
        candidate.swap(i, j);
        let candidate_cost = route_cost(&candidate, weights);
        let delta = candidate_cost - current_cost;

        if delta < 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
            current = candidate;
            current_cost = candidate_cost;

            if current_cost < best.cost {
                best.stops = current.clone();
                best.cost = current_cost;
            }
        }

        temperature *= schedule.cooling_rate;
    }

    Tour::new(best.stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServicePoint;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Counts every word drawn from the wrapped generator.
    struct Counting {
        inner: StdRng,
        draws: usize,
    }

    impl Counting {
        fn new(seed: u64) -> Self {
            Self {
                inner: StdRng::seed_from_u64(seed),
                draws: 0,
            }
        }
    }

    impl RngCore for Counting {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest)
        }
    }

    fn points() -> Vec<ServicePoint> {
        vec![
            ServicePoint::new("a", "a", "Pune", (18.5204, 73.8567), 90.0),
            ServicePoint::new("b", "b", "Pune", (18.5598, 73.7775), 20.0),
            ServicePoint::new("c", "c", "Pune", (18.5089, 73.9260), 70.0),
            ServicePoint::new("d", "d", "Pune", (18.5916, 73.7309), 40.0),
            ServicePoint::new("e", "e", "Pune", (18.5362, 73.8958), 65.0),
            ServicePoint::new("f", "f", "Pune", (18.5642, 73.8069), 5.0),
        ]
    }

    #[test]
    fn defaults_match_documented_schedule() {
        let schedule = AnnealingSchedule::default();
        assert_eq!(schedule.initial_temperature, 100.0);
        assert_eq!(schedule.cooling_rate, 0.95);
        assert_eq!(schedule.min_temperature, 0.1);
        assert_eq!(schedule.max_iterations, 200);

        let custom = AnnealingSchedule::new(50.0, 0.92);
        assert_eq!(custom.max_iterations, 200);
        assert_eq!(custom.initial_temperature, 50.0);
    }

    #[test]
    fn never_worse_than_input() {
        let points = points();
        let weights = CostWeights::default();
        for seed in 0..20 {
            let tour = Tour::new(points.iter().collect());
            let before = tour.cost(&weights);
            let mut rng = StdRng::seed_from_u64(seed);
            let after = anneal(tour, &weights, &AnnealingSchedule::default(), &mut rng);
            assert!(after.cost(&weights) <= before, "seed {} regressed", seed);
        }
    }

    #[test]
    fn keeps_first_stop_and_membership() {
        let points = points();
        let tour = Tour::new(points.iter().collect());
        let mut rng = StdRng::seed_from_u64(7);
        let schedule = AnnealingSchedule::default();
        let result = anneal(tour, &CostWeights::default(), &schedule, &mut rng);

        let mut ids = result.ids();
        assert_eq!(ids[0], "a");
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn same_seed_same_tour() {
        let points = points();
        let weights = CostWeights::default();
        let schedule = AnnealingSchedule::new(50.0, 0.92);

        let first = anneal(
            Tour::new(points.iter().collect()),
            &weights,
            &schedule,
            &mut StdRng::seed_from_u64(42),
        );
        let second = anneal(
            Tour::new(points.iter().collect()),
            &weights,
            &schedule,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(first.ids(), second.ids());
    }

    #[test]
    fn cold_schedule_is_identity() {
        let points = points();
        let tour = Tour::new(points.iter().collect());
        let schedule = AnnealingSchedule {
            initial_temperature: 0.05,
            ..AnnealingSchedule::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = anneal(tour, &CostWeights::default(), &schedule, &mut rng);
        assert_eq!(result.ids(), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn iteration_cap_ends_a_walk_that_never_cools() {
        let points = points();
        let weights = CostWeights::default();
        let schedule = AnnealingSchedule {
            cooling_rate: 1.0,
            max_iterations: 0,
            ..AnnealingSchedule::default()
        };
        let mut rng = Counting::new(3);
        let result = anneal(Tour::new(points.iter().collect()), &weights, &schedule, &mut rng);
        assert_eq!(rng.draws, 0);
        assert_eq!(result.ids(), vec!["a", "b", "c", "d", "e", "f"]);

        // Every iteration draws its first swap position; none draws more than
        // two positions and one acceptance roll.
        let schedule = AnnealingSchedule {
            max_iterations: 25,
            ..schedule
        };
        let mut rng = Counting::new(3);
        let result = anneal(Tour::new(points.iter().collect()), &weights, &schedule, &mut rng);
        assert!(rng.draws >= 25, "only {} draws", rng.draws);
        assert!(rng.draws <= 8 * 25, "{} draws", rng.draws);
        assert_eq!(result.len(), 6);
    }
}
