//! Dijkstra shortest paths over a [`RoadGraph`].
//!
//! Edge costs must be non-negative; see [`RoadGraph`]. Queue ties are broken
//! by the lowest dense node index, which makes every result deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::NodeId;
use crate::traits::RoadGraph;

/// Outcome of a shortest-path cost query.
///
/// Unreachable targets stay tagged here. They are only turned into a numeric
/// sentinel when the distance matrix is assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCost {
    Reachable(f64),
    Unreachable,
}

impl PathCost {
    pub fn is_reachable(self) -> bool {
        matches!(self, PathCost::Reachable(_))
    }

    pub fn cost(self) -> Option<f64> {
        match self {
            PathCost::Reachable(cost) => Some(cost),
            PathCost::Unreachable => None,
        }
    }
}

/// Least-cost path length from `source` to `target`.
///
/// Unknown node ids are treated as unreachable.
pub fn shortest_path_cost<G>(graph: &G, source: NodeId, target: NodeId) -> PathCost
where
    G: RoadGraph + ?Sized,
{
    shortest_path_costs(graph, source, &[target])
        .into_iter()
        .next()
        .unwrap_or(PathCost::Unreachable)
}

/// Least-cost path lengths from `source` to each of `targets`, in order.
///
/// Runs a single search that stops as soon as every target is settled.
pub fn shortest_path_costs<G>(graph: &G, source: NodeId, targets: &[NodeId]) -> Vec<PathCost>
where
    G: RoadGraph + ?Sized,
{
    let target_indices: Vec<Option<usize>> = targets.iter().map(|&t| graph.index_of(t)).collect();
    let Some(source_index) = graph.index_of(source) else {
        return vec![PathCost::Unreachable; targets.len()];
    };

    let mut pending = vec![false; graph.node_count()];
    let mut remaining = 0usize;
    for &index in target_indices.iter().flatten() {
        if !pending[index] {
            pending[index] = true;
            remaining += 1;
        }
    }
    if remaining == 0 {
        return vec![PathCost::Unreachable; targets.len()];
    }

    let search = Search::run(graph, source_index, |settled| {
        if pending[settled] {
            pending[settled] = false;
            remaining -= 1;
        }
        remaining == 0
    });

    target_indices
        .iter()
        .map(|index| index.map_or(PathCost::Unreachable, |i| search.cost_to(i)))
        .collect()
}

/// Node sequence of a least-cost path from `source` to `target`.
///
/// Empty when no path exists; `[source]` when `source == target`.
pub fn shortest_path<G>(graph: &G, source: NodeId, target: NodeId) -> Vec<NodeId>
where
    G: RoadGraph + ?Sized,
{
    let (Some(source_index), Some(target_index)) = (graph.index_of(source), graph.index_of(target))
    else {
        return Vec::new();
    };

    let search = Search::run(graph, source_index, |settled| settled == target_index);
    search
        .path_to(target_index)
        .into_iter()
        .map(|index| graph.node(index).id)
        .collect()
}

/// Min-heap entry; lower cost first, then lower index.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    index: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so both keys are reversed.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Labels left behind by one Dijkstra run.
struct Search {
    dist: Vec<f64>,
    parent: Vec<Option<usize>>,
    settled: Vec<bool>,
}

impl Search {
    /// Settle nodes from `source` until `stop` returns true for a settled
    /// node or the queue runs dry.
    fn run<G, F>(graph: &G, source: usize, mut stop: F) -> Self
    where
        G: RoadGraph + ?Sized,
        F: FnMut(usize) -> bool,
    {
        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut parent = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();

        dist[source] = 0.0;
        heap.push(QueueEntry {
            cost: 0.0,
            index: source,
        });

        while let Some(QueueEntry { cost, index }) = heap.pop() {
            if settled[index] {
                continue;
            }
            settled[index] = true;
            if stop(index) {
                break;
            }

            for edge in graph.out_edges(index) {
                let candidate = cost + edge.cost;
                if candidate < dist[edge.head] {
                    dist[edge.head] = candidate;
                    parent[edge.head] = Some(index);
                    heap.push(QueueEntry {
                        cost: candidate,
                        index: edge.head,
                    });
                }
            }
        }

        Self {
            dist,
            parent,
            settled,
        }
    }

    fn cost_to(&self, index: usize) -> PathCost {
        if self.settled[index] {
            PathCost::Reachable(self.dist[index])
        } else {
            PathCost::Unreachable
        }
    }

    fn path_to(&self, index: usize) -> Vec<usize> {
        if !self.settled[index] {
            return Vec::new();
        }
        let mut path = vec![index];
        let mut current = index;
        while let Some(prev) = self.parent[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Graph, Node};

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().map(|&id| NodeId(id)).collect()
    }

    /// 1 -> 2 -> 4 and 1 -> 3 -> 4 both cost 2; 4 -> 1 costs 10; 5 is isolated.
    fn diamond() -> Graph {
        let nodes = (1..=5).map(|id| Node::new(id, 0.0, id as f64 * 0.01)).collect();
        Graph::new(
            nodes,
            vec![
                Edge::new(1, 3, 1.0),
                Edge::new(1, 2, 1.0),
                Edge::new(2, 4, 1.0),
                Edge::new(3, 4, 1.0),
                Edge::new(4, 1, 10.0),
            ],
        )
        .expect("valid graph")
    }

    #[test]
    fn test_source_equals_target() {
        let graph = diamond();
        assert_eq!(shortest_path_cost(&graph, NodeId(3), NodeId(3)), PathCost::Reachable(0.0));
        assert_eq!(shortest_path(&graph, NodeId(3), NodeId(3)), ids(&[3]));
    }

    #[test]
    fn test_directed_costs_are_asymmetric() {
        let graph = diamond();
        assert_eq!(shortest_path_cost(&graph, NodeId(1), NodeId(4)), PathCost::Reachable(2.0));
        assert_eq!(shortest_path_cost(&graph, NodeId(4), NodeId(1)), PathCost::Reachable(10.0));
        assert_eq!(shortest_path_cost(&graph, NodeId(4), NodeId(2)), PathCost::Reachable(11.0));
    }

    #[test]
    fn test_ties_prefer_lowest_node_id() {
        let graph = diamond();
        assert_eq!(shortest_path(&graph, NodeId(1), NodeId(4)), ids(&[1, 2, 4]));
    }

    #[test]
    fn test_unreachable_target() {
        let graph = diamond();
        assert_eq!(shortest_path_cost(&graph, NodeId(1), NodeId(5)), PathCost::Unreachable);
        assert!(shortest_path(&graph, NodeId(1), NodeId(5)).is_empty());
        assert!(shortest_path(&graph, NodeId(5), NodeId(1)).is_empty());
    }

    #[test]
    fn test_unknown_nodes_are_unreachable() {
        let graph = diamond();
        assert_eq!(shortest_path_cost(&graph, NodeId(99), NodeId(1)), PathCost::Unreachable);
        assert_eq!(shortest_path_cost(&graph, NodeId(1), NodeId(99)), PathCost::Unreachable);
        assert!(shortest_path(&graph, NodeId(1), NodeId(99)).is_empty());
    }

    #[test]
    fn test_multi_target_matches_single_pair() {
        let graph = diamond();
        let targets = ids(&[4, 1, 5, 2, 4, 99]);
        let costs = shortest_path_costs(&graph, NodeId(1), &targets);
        let expected: Vec<PathCost> = targets
            .iter()
            .map(|&t| shortest_path_cost(&graph, NodeId(1), t))
            .collect();
        assert_eq!(costs, expected);
        assert_eq!(costs[0], PathCost::Reachable(2.0));
        assert_eq!(costs[1], PathCost::Reachable(0.0));
        assert_eq!(costs[2], PathCost::Unreachable);
    }

    #[test]
    fn test_path_cost_accessors() {
        assert_eq!(PathCost::Reachable(3.5).cost(), Some(3.5));
        assert_eq!(PathCost::Unreachable.cost(), None);
        assert!(!PathCost::Unreachable.is_reachable());
    }

    #[test]
    fn test_queue_entry_orders_cheapest_then_lowest_index() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { cost: 2.0, index: 0 });
        heap.push(QueueEntry { cost: 1.0, index: 7 });
        heap.push(QueueEntry { cost: 1.0, index: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.index).collect();
        assert_eq!(order, vec![3, 7, 0]);
    }
}
