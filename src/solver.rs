//! Collection tour optimizer.
//!
//! Three phases, each never worse than the one before:
//! 1. priority-weighted nearest neighbor (deterministic construction)
//! 2. 2-opt local search
//! 3. simulated annealing, only for tours with enough stops to benefit

use rand::Rng;
use tracing::debug;

use crate::annealing::{AnnealingSchedule, anneal};
use crate::cost::{CostWeights, route_cost};
use crate::haversine::haversine_km;
use crate::local_search::two_opt;
use crate::traits::Stop;

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    pub weights: CostWeights,
    /// Maximum accepted 2-opt improvements before local search gives up.
    pub local_search_iterations: usize,
    pub annealing: AnnealingSchedule,
    /// Smallest tour the annealing phase runs on.
    pub annealing_min_stops: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            weights: CostWeights::default(),
            local_search_iterations: 100,
            annealing: AnnealingSchedule::new(50.0, 0.92),
            annealing_min_stops: 4,
        }
    }
}

/// An ordered visit of every candidate stop, each exactly once.
#[derive(Debug)]
pub struct Tour<'a, S> {
    stops: Vec<&'a S>,
}

impl<S> Clone for Tour<'_, S> {
    fn clone(&self) -> Self {
        Self {
            stops: self.stops.clone(),
        }
    }
}

impl<'a, S> Tour<'a, S> {
    pub fn new(stops: Vec<&'a S>) -> Self {
        Self { stops }
    }

    pub fn empty() -> Self {
        Self { stops: Vec::new() }
    }

    pub fn stops(&self) -> &[&'a S] {
        &self.stops
    }

    pub fn get(&self, index: usize) -> Option<&'a S> {
        self.stops.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn into_stops(self) -> Vec<&'a S> {
        self.stops
    }
}

impl<S: Stop> Tour<'_, S> {
    pub fn ids(&self) -> Vec<S::Id> {
        self.stops.iter().map(|stop| stop.id().clone()).collect()
    }

    pub fn locations(&self) -> Vec<(f64, f64)> {
        self.stops.iter().map(|stop| stop.location()).collect()
    }

    pub fn cost(&self, weights: &CostWeights) -> f64 {
        route_cost(&self.stops, weights)
    }
}

#[derive(Debug, Clone)]
pub struct PlanResult<'a, S> {
    pub tour: Tour<'a, S>,
    /// Cost of the constructed tour, before any improvement phase.
    pub construction_cost: f64,
    /// Cost of `tour`; never above `construction_cost`.
    pub cost: f64,
}

/// Optimize with the thread-local random source.
pub fn optimize<'a, S: Stop>(points: &'a [S], options: &OptimizeOptions) -> PlanResult<'a, S> {
    optimize_with_rng(points, options, &mut rand::rng())
}

/// Optimize with an injected random source, for reproducible runs.
///
/// Randomness is only consumed by the annealing phase.
pub fn optimize_with_rng<'a, S, R>(
    points: &'a [S],
    options: &OptimizeOptions,
    rng: &mut R,
) -> PlanResult<'a, S>
where
    S: Stop,
    R: Rng,
{
    if points.len() < 2 {
        return PlanResult {
            tour: Tour::new(points.iter().collect()),
            construction_cost: 0.0,
            cost: 0.0,
        };
    }

    let weights = &options.weights;

    let tour = construct_tour(points, weights);
    let construction_cost = tour.cost(weights);
    debug!(stops = tour.len(), cost = construction_cost, "constructed initial tour");

    let mut tour = two_opt(tour, weights, options.local_search_iterations);
    debug!(cost = tour.cost(weights), "2-opt finished");

    if tour.len() >= options.annealing_min_stops {
        tour = anneal(tour, weights, &options.annealing, rng);
        debug!(cost = tour.cost(weights), "annealing finished");
    }

    let cost = tour.cost(weights);
    PlanResult {
        tour,
        construction_cost,
        cost,
    }
}

/// Priority-weighted nearest neighbor.
///
/// Starts at the most urgent stop, then repeatedly moves to the unvisited stop
/// with the best [`CostWeights::next_stop_score`]. Ties go to the earlier
/// candidate in input order, so the result is deterministic.
pub fn construct_tour<'a, S: Stop>(points: &'a [S], weights: &CostWeights) -> Tour<'a, S> {
    let mut unvisited: Vec<&'a S> = points.iter().collect();
    let Some(start) = most_urgent(&unvisited) else {
        return Tour::empty();
    };

    let mut current = unvisited.remove(start);
    let mut stops = Vec::with_capacity(points.len());
    stops.push(current);

    while !unvisited.is_empty() {
        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;

        for (index, candidate) in unvisited.iter().enumerate() {
            let distance = haversine_km(current.location(), candidate.location());
            let score = weights.next_stop_score(candidate.urgency(), distance);
            if score > best_score {
                best_score = score;
                best_index = index;
            }
        }

        current = unvisited.remove(best_index);
        stops.push(current);
    }

    Tour::new(stops)
}

fn most_urgent<S: Stop>(stops: &[&S]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, stop) in stops.iter().enumerate() {
        match best {
            Some((_, urgency)) if stop.urgency() <= urgency => {}
            _ => best = Some((index, stop.urgency())),
        }
    }
    best.map(|(index, _)| index)
}
