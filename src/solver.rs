//! Single-vehicle tour solver over an asymmetric distance matrix.
//!
//! A construction heuristic builds a closed tour from POI 0, then local
//! search (2-opt and relocate) improves it until no move helps, the
//! iteration budget runs out, or the deadline passes.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::deadline::{Completion, Deadline};
use crate::error::{InvalidInput, RoutingError};
use crate::matrix::DistanceMatrix;

/// Smallest cost reduction (seconds) accepted as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// How the initial tour is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construction {
    /// Grow the tour by inserting the POI with the least marginal cost at
    /// its cheapest position.
    CheapestInsertion,
    /// Always drive to the unvisited POI with the cheapest outgoing arc.
    NearestArc,
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Maximum iterations for local search improvement.
    pub local_search_iterations: usize,
    /// Construction heuristics to try; the cheapest resulting tour wins.
    pub construction: Vec<Construction>,
    /// Run the construction heuristics on the rayon pool.
    pub parallel: bool,
    /// Checked between local search iterations.
    pub deadline: Deadline,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            local_search_iterations: 1_000,
            construction: vec![Construction::CheapestInsertion, Construction::NearestArc],
            parallel: true,
            deadline: Deadline::none(),
        }
    }
}

/// Closed visiting order over POI indices: `[0, …, 0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    stops: Vec<usize>,
}

impl Route {
    /// Validate a closed tour over `size` POIs.
    pub fn new(stops: Vec<usize>, size: usize) -> Result<Self, RoutingError> {
        let route = Self { stops };
        route.check_size(size)?;
        Ok(route)
    }

    /// `Ok` if this is a closed tour over exactly `size` POIs.
    pub fn check_size(&self, size: usize) -> Result<(), RoutingError> {
        if self.is_valid_for(size) {
            Ok(())
        } else {
            Err(InvalidInput::Route(format!(
                "{:?} is not a closed tour over {size} points",
                self.stops
            ))
            .into())
        }
    }

    /// POI indices in visiting order, depot at both ends.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Consecutive `(from, to)` pairs, including the closing leg.
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.stops.windows(2).map(|leg| (leg[0], leg[1]))
    }

    /// Starts and ends at 0 and visits every other index exactly once.
    pub fn is_valid_for(&self, size: usize) -> bool {
        if size < 2 || self.stops.len() != size + 1 {
            return false;
        }
        if self.stops.first() != Some(&0) || self.stops.last() != Some(&0) {
            return false;
        }
        let mut seen = vec![false; size];
        for &stop in &self.stops[..size] {
            if stop >= size || seen[stop] {
                return false;
            }
            seen[stop] = true;
        }
        true
    }
}

/// Best tour found and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub route: Route,
    /// Sum of matrix entries along the route, closing leg included.
    pub total_cost: f64,
    pub completion: Completion,
}

/// Find a low-cost closed tour through every POI of `matrix`.
///
/// Fails with [`RoutingError::NoSolution`] when there are fewer than two
/// POIs. A deadline never discards work: the best tour so far comes back
/// with [`Completion::Cancelled`].
pub fn solve(matrix: &DistanceMatrix, options: &SolveOptions) -> Result<Solution, RoutingError> {
    if matrix.size() < 2 {
        return Err(RoutingError::NoSolution);
    }

    let strategies: &[Construction] = if options.construction.is_empty() {
        &[Construction::CheapestInsertion]
    } else {
        &options.construction
    };

    let run = |&strategy: &Construction| run_strategy(matrix, strategy, options);
    let candidates: Vec<Solution> = if options.parallel && strategies.len() > 1 {
        strategies.par_iter().map(run).collect()
    } else {
        strategies.iter().map(run).collect()
    };

    let completion = candidates
        .iter()
        .fold(Completion::Complete, |acc, c| acc.and(c.completion));

    let mut best: Option<Solution> = None;
    for candidate in candidates {
        if best
            .as_ref()
            .is_none_or(|b| candidate.total_cost < b.total_cost)
        {
            best = Some(candidate);
        }
    }
    let mut best = best.ok_or(RoutingError::NoSolution)?;
    best.completion = completion;

    info!(
        pois = matrix.size(),
        total_cost = best.total_cost,
        ?completion,
        "tour solved"
    );
    Ok(best)
}

/// Apply 2-opt moves to `route` until none improves it.
///
/// `route` must be a tour over `matrix.size()` POIs.
pub fn two_opt(matrix: &DistanceMatrix, route: &Route) -> Result<Route, RoutingError> {
    route.check_size(matrix.size())?;
    let mut stops = route.stops.clone();
    while two_opt_improve(matrix, &mut stops) {}
    Ok(Route { stops })
}

fn run_strategy(matrix: &DistanceMatrix, strategy: Construction, options: &SolveOptions) -> Solution {
    let mut stops = match strategy {
        Construction::CheapestInsertion => cheapest_insertion(matrix),
        Construction::NearestArc => nearest_arc(matrix),
    };
    debug!(?strategy, cost = matrix.route_cost(&stops), "initial tour built");

    let completion = local_search(
        matrix,
        &mut stops,
        options.local_search_iterations,
        options.deadline,
    );
    let total_cost = matrix.route_cost(&stops);
    debug!(?strategy, total_cost, "local search finished");

    Solution {
        route: Route { stops },
        total_cost,
        completion,
    }
}

// ============================================================================
// Construction
// ============================================================================

fn cheapest_insertion(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.size();
    let mut stops = vec![0, 0];
    let mut inserted = vec![false; n];
    inserted[0] = true;

    for _ in 1..n {
        // (marginal cost, poi, position)
        let mut best: Option<(f64, usize, usize)> = None;
        for poi in (1..n).filter(|&poi| !inserted[poi]) {
            for position in 1..stops.len() {
                let (a, b) = (stops[position - 1], stops[position]);
                let delta = matrix.get(a, poi) + matrix.get(poi, b) - matrix.get(a, b);
                if best.is_none_or(|(best_delta, _, _)| delta < best_delta) {
                    best = Some((delta, poi, position));
                }
            }
        }
        if let Some((_, poi, position)) = best {
            stops.insert(position, poi);
            inserted[poi] = true;
        }
    }

    stops
}

fn nearest_arc(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.size();
    let mut stops = Vec::with_capacity(n + 1);
    let mut visited = vec![false; n];
    let mut current = 0;
    stops.push(0);
    visited[0] = true;

    for _ in 1..n {
        let next = (1..n)
            .filter(|&poi| !visited[poi])
            .min_by(|&a, &b| matrix.get(current, a).total_cmp(&matrix.get(current, b)));
        let Some(next) = next else {
            break;
        };
        stops.push(next);
        visited[next] = true;
        current = next;
    }

    stops.push(0);
    stops
}

// ============================================================================
// Local Search Operators
// ============================================================================

/// Run local search until no move improves or the budget is spent.
fn local_search(
    matrix: &DistanceMatrix,
    stops: &mut Vec<usize>,
    iterations: usize,
    deadline: Deadline,
) -> Completion {
    for iteration in 0..iterations {
        if deadline.is_expired() {
            warn!(iteration, "deadline expired during local search");
            return Completion::Cancelled;
        }

        let improved = two_opt_improve(matrix, stops) || relocate_improve(matrix, stops);
        if !improved {
            debug!(iteration, "local search converged");
            break;
        }
    }
    Completion::Complete
}

/// 2-opt: reverse the segment `stops[i..=j]` with the largest saving.
///
/// The matrix is asymmetric, so reversing a segment also flips the
/// direction of every arc inside it. Prefix sums in both directions keep
/// each candidate O(1). Returns true if a move was applied.
fn two_opt_improve(matrix: &DistanceMatrix, stops: &mut [usize]) -> bool {
    let m = stops.len();
    if m < 4 {
        return false;
    }

    let mut forward = vec![0.0; m];
    let mut backward = vec![0.0; m];
    for k in 1..m {
        forward[k] = forward[k - 1] + matrix.get(stops[k - 1], stops[k]);
        backward[k] = backward[k - 1] + matrix.get(stops[k], stops[k - 1]);
    }

    let mut best: Option<(f64, usize, usize)> = None;
    for i in 1..m - 2 {
        for j in i + 1..m - 1 {
            let (a, b) = (stops[i - 1], stops[j + 1]);
            let before = matrix.get(a, stops[i]) + (forward[j] - forward[i]) + matrix.get(stops[j], b);
            let after = matrix.get(a, stops[j]) + (backward[j] - backward[i]) + matrix.get(stops[i], b);
            let gain = before - after;
            if gain > IMPROVEMENT_EPSILON && best.is_none_or(|(best_gain, _, _)| gain > best_gain) {
                best = Some((gain, i, j));
            }
        }
    }

    match best {
        Some((_, i, j)) => {
            stops[i..=j].reverse();
            true
        }
        None => false,
    }
}

/// Relocate: move one POI to the position with the largest saving.
/// Returns true if a move was applied.
fn relocate_improve(matrix: &DistanceMatrix, stops: &mut Vec<usize>) -> bool {
    let m = stops.len();
    if m < 4 {
        return false;
    }

    let mut best: Option<(f64, usize, usize)> = None;
    for from in 1..m - 1 {
        let poi = stops[from];
        let (prev, next) = (stops[from - 1], stops[from + 1]);
        let removal_gain = matrix.get(prev, poi) + matrix.get(poi, next) - matrix.get(prev, next);

        // Positions in the tour with `poi` taken out.
        let reduced = |k: usize| if k < from { stops[k] } else { stops[k + 1] };
        for to in 1..m - 1 {
            if to == from {
                continue;
            }
            let (a, b) = (reduced(to - 1), reduced(to));
            let insertion_cost = matrix.get(a, poi) + matrix.get(poi, b) - matrix.get(a, b);
            let gain = removal_gain - insertion_cost;
            if gain > IMPROVEMENT_EPSILON && best.is_none_or(|(best_gain, _, _)| gain > best_gain) {
                best = Some((gain, from, to));
            }
        }
    }

    match best {
        Some((_, from, to)) => {
            let poi = stops.remove(from);
            stops.insert(to, poi);
            true
        }
        None => false,
    }
}
