//! Dense POI-to-POI travel-time matrix.
//!
//! Each row comes from one multi-target Dijkstra run from that POI, so a
//! matrix over `n` POIs costs `n` searches rather than `n * n`. Rows are
//! independent and are computed on the rayon pool when allowed.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::deadline::{Completion, Deadline};
use crate::error::{InvalidInput, RoutingError};
use crate::poi::PoiSet;
use crate::shortest_path::{PathCost, shortest_path_costs};
use crate::traits::RoadGraph;

/// Cost substituted for POI pairs with no connecting path.
pub const UNREACHABLE_COST: f64 = 1_000_000.0;

/// Square matrix of least-cost travel times, row-major.
///
/// Entry `(i, j)` is the cost from POI `i` to POI `j`. The diagonal is zero,
/// every entry is finite and non-negative, and `(i, j)` need not equal
/// `(j, i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    costs: Vec<f64>,
}

impl DistanceMatrix {
    /// Wrap caller-supplied rows after checking the matrix invariants.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, RoutingError> {
        let size = rows.len();
        let mut costs = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(matrix_error(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            for (j, &cost) in row.iter().enumerate() {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(matrix_error(format!("entry ({i}, {j}) is {cost}")));
                }
                if i == j && cost != 0.0 {
                    return Err(matrix_error(format!("diagonal entry {i} is {cost}")));
                }
            }
            costs.extend(row);
        }
        Ok(Self { size, costs })
    }

    /// Number of POIs (rows and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.size + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.costs[from * self.size..(from + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.costs.chunks(self.size.max(1))
    }

    /// Sum of the entries along consecutive stops.
    pub fn route_cost(&self, stops: &[usize]) -> f64 {
        stops.windows(2).map(|leg| self.get(leg[0], leg[1])).sum()
    }
}

fn matrix_error(message: String) -> RoutingError {
    InvalidInput::Matrix(message).into()
}

/// A usable unreachable cost is finite and strictly positive.
pub fn check_unreachable_cost(cost: f64) -> Result<(), InvalidInput> {
    if cost.is_finite() && cost > 0.0 {
        Ok(())
    } else {
        Err(InvalidInput::UnreachableCost { cost })
    }
}

/// Settings for [`build_matrix`].
#[derive(Debug, Clone)]
pub struct MatrixOptions {
    /// Cost written for unreachable pairs. Should exceed any real tour cost.
    pub unreachable_cost: f64,
    /// Compute rows on the rayon pool.
    pub parallel: bool,
    /// Checked before each row is started.
    pub deadline: Deadline,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            unreachable_cost: UNREACHABLE_COST,
            parallel: true,
            deadline: Deadline::none(),
        }
    }
}

/// A matrix plus what happened while building it.
#[derive(Debug, Clone)]
pub struct MatrixBuild {
    pub matrix: DistanceMatrix,
    /// Ordered pairs that received the unreachable cost.
    pub unreachable_pairs: usize,
    /// Sum over rows of the largest reachable entry. No tour over real
    /// roads costs more than this.
    pub reachable_bound: f64,
    /// `Cancelled` if the deadline hit before every row was computed; the
    /// missing rows hold the unreachable cost off the diagonal.
    pub completion: Completion,
}

/// Build the POI distance matrix over `graph`.
///
/// Every POI must be a node of the graph and `options.unreachable_cost`
/// must be finite and positive.
pub fn build_matrix<G>(
    graph: &G,
    pois: &PoiSet,
    options: &MatrixOptions,
) -> Result<MatrixBuild, RoutingError>
where
    G: RoadGraph + ?Sized,
{
    check_unreachable_cost(options.unreachable_cost)?;
    if let Some(&node) = pois.nodes().iter().find(|&&node| graph.index_of(node).is_none()) {
        return Err(InvalidInput::UnknownNode { node }.into());
    }

    let started = Instant::now();
    let n = pois.len();
    let compute_row = |source: usize| -> Option<Vec<PathCost>> {
        if options.deadline.is_expired() {
            return None;
        }
        Some(shortest_path_costs(graph, pois.nodes()[source], pois.nodes()))
    };

    let rows: Vec<Option<Vec<PathCost>>> = if options.parallel {
        (0..n).into_par_iter().map(compute_row).collect()
    } else {
        (0..n).map(compute_row).collect()
    };

    let sentinel = options.unreachable_cost;
    let mut costs = Vec::with_capacity(n * n);
    let mut unreachable_pairs = 0;
    let mut skipped_rows = 0;
    let mut reachable_bound = 0.0;

    for (i, row) in rows.into_iter().enumerate() {
        match row {
            Some(row) => {
                let mut row_max: f64 = 0.0;
                for cost in row {
                    match cost {
                        PathCost::Reachable(cost) => {
                            row_max = row_max.max(cost);
                            costs.push(cost);
                        }
                        PathCost::Unreachable => {
                            unreachable_pairs += 1;
                            costs.push(sentinel);
                        }
                    }
                }
                reachable_bound += row_max;
            }
            None => {
                skipped_rows += 1;
                costs.extend((0..n).map(|j| if i == j { 0.0 } else { sentinel }));
            }
        }
    }

    if reachable_bound >= sentinel {
        warn!(
            reachable_bound,
            sentinel, "a tour over real roads may cost more than the unreachable cost"
        );
    }

    let completion = if skipped_rows == 0 {
        Completion::Complete
    } else {
        warn!(skipped_rows, "deadline expired while building the distance matrix");
        Completion::Cancelled
    };

    info!(
        pois = n,
        unreachable_pairs,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "distance matrix built"
    );

    Ok(MatrixBuild {
        matrix: DistanceMatrix { size: n, costs },
        unreachable_pairs,
        reachable_bound,
        completion,
    })
}
