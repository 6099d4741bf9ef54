//! Core graph trait for the routing planner.
//!
//! This is intentionally minimal: the planner only needs read access to a
//! road network. Loaders that keep their own storage can implement it
//! directly; [`Graph`](crate::graph::Graph) is the in-memory default.

use crate::graph::{Node, NodeId, OutEdge};
use crate::haversine::haversine_km;

/// Read-only access to a weighted directed road network.
///
/// Nodes are addressed by a dense index in `0..node_count()`. Shortest-path
/// searches break ties on this index, so implementations that want ties
/// resolved by lowest [`NodeId`] should store nodes in id order.
///
/// Every edge cost must be finite and non-negative. Searches do not check
/// this; [`Graph`](crate::graph::Graph) enforces it at construction.
///
/// The graph must not change while a routing request borrows it. `Sync` lets
/// one graph serve many concurrent requests.
pub trait RoadGraph: Sync {
    fn node_count(&self) -> usize;

    /// Dense index for a node id, if the node exists.
    fn index_of(&self, id: NodeId) -> Option<usize>;

    /// Node at a dense index. Panics if `index >= node_count()`.
    fn node(&self, index: usize) -> &Node;

    /// Outgoing edges of the node at `index`.
    fn out_edges(&self, index: usize) -> &[OutEdge];

    /// Node closest to `(lat, lng)` by great-circle distance.
    ///
    /// Ties go to the lowest index. Returns `None` for an empty graph.
    fn nearest_node(&self, lat: f64, lng: f64) -> Option<NodeId> {
        let mut best: Option<(f64, NodeId)> = None;
        for index in 0..self.node_count() {
            let node = self.node(index);
            let km = haversine_km((lat, lng), node.coords());
            if best.is_none_or(|(best_km, _)| km < best_km) {
                best = Some((km, node.id));
            }
        }
        best.map(|(_, id)| id)
    }
}
