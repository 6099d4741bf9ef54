//! End-to-end routing pipeline: snap, matrix, solve, materialize.

use tracing::{info, info_span};

use crate::config::PlannerConfig;
use crate::deadline::Completion;
use crate::error::RoutingError;
use crate::graph::NodeId;
use crate::materialize::{PathSegment, materialize};
use crate::matrix::{DistanceMatrix, build_matrix};
use crate::poi::PoiSet;
use crate::solver::{Solution, solve};
use crate::traits::RoadGraph;

/// Everything produced for one routing request.
#[derive(Debug, Clone)]
pub struct TourPlan {
    pub pois: PoiSet,
    pub matrix: DistanceMatrix,
    /// Ordered POI pairs that had no connecting road.
    pub unreachable_pairs: usize,
    pub solution: Solution,
    /// Road path of each leg, in visiting order.
    pub segments: Vec<PathSegment>,
    /// `Cancelled` if either the matrix or the solver hit the deadline.
    pub completion: Completion,
}

impl TourPlan {
    pub fn total_cost(&self) -> f64 {
        self.solution.total_cost
    }

    /// Graph nodes of the POIs in visiting order, depot at both ends.
    pub fn stop_nodes(&self) -> Vec<NodeId> {
        self.solution
            .route
            .stops()
            .iter()
            .map(|&stop| self.pois.nodes()[stop])
            .collect()
    }
}

/// Runs routing requests against any [`RoadGraph`].
///
/// Holds no graph state, so one planner can serve many graphs and threads.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a tour through raw (lat, lng) locations; the first is the depot.
    pub fn plan_locations<G>(
        &self,
        graph: &G,
        locations: &[(f64, f64)],
    ) -> Result<TourPlan, RoutingError>
    where
        G: RoadGraph + ?Sized,
    {
        let pois = info_span!("snap", locations = locations.len())
            .in_scope(|| PoiSet::snap(graph, locations))?;
        self.plan_nodes(graph, pois)
    }

    /// Plan a tour through graph nodes; `pois.depot()` starts and ends it.
    pub fn plan_nodes<G>(&self, graph: &G, pois: PoiSet) -> Result<TourPlan, RoutingError>
    where
        G: RoadGraph + ?Sized,
    {
        let _span = info_span!("plan", pois = pois.len()).entered();
        let deadline = self.config.deadline();

        let build = info_span!("matrix")
            .in_scope(|| build_matrix(graph, &pois, &self.config.matrix_options(deadline)))?;
        let solution = info_span!("solve")
            .in_scope(|| solve(&build.matrix, &self.config.solve_options(deadline)))?;
        let segments =
            info_span!("materialize").in_scope(|| materialize(graph, &pois, &solution.route))?;

        let completion = build.completion.and(solution.completion);
        info!(
            total_cost = solution.total_cost,
            unreachable_pairs = build.unreachable_pairs,
            ?completion,
            "tour planned"
        );

        Ok(TourPlan {
            pois,
            matrix: build.matrix,
            unreachable_pairs: build.unreachable_pairs,
            solution,
            segments,
            completion,
        })
    }
}
