//! Expand a solved route back into road-network paths.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::RoutingError;
use crate::graph::NodeId;
use crate::poi::PoiSet;
use crate::polyline::Polyline;
use crate::shortest_path::shortest_path;
use crate::solver::Route;
use crate::traits::RoadGraph;

/// Road path for one leg of the tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSegment {
    /// POI index the leg starts at.
    pub from: usize,
    /// POI index the leg ends at.
    pub to: usize,
    /// Nodes from `pois[from]` to `pois[to]`; empty if no road connects them.
    pub nodes: Vec<NodeId>,
}

impl PathSegment {
    pub fn is_connected(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn polyline<G>(&self, graph: &G) -> Polyline
    where
        G: RoadGraph + ?Sized,
    {
        Polyline::from_nodes(graph, &self.nodes)
    }
}

/// One [`PathSegment`] per consecutive pair of `route`, in order.
///
/// Reads `graph`, `pois` and `route` only. Legs are expanded on the rayon
/// pool. `route` must be a tour over exactly `pois.len()` POIs.
pub fn materialize<G>(
    graph: &G,
    pois: &PoiSet,
    route: &Route,
) -> Result<Vec<PathSegment>, RoutingError>
where
    G: RoadGraph + ?Sized,
{
    route.check_size(pois.len())?;
    let legs: Vec<(usize, usize)> = route.legs().collect();
    Ok(legs
        .into_par_iter()
        .map(|(from, to)| PathSegment {
            from,
            to,
            nodes: shortest_path(graph, pois.nodes()[from], pois.nodes()[to]),
        })
        .collect())
}
