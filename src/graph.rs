//! In-memory road network.
//!
//! Built once by the graph-loading collaborator and then only read. Nodes
//! are kept sorted by [`NodeId`] so that dense indices follow id order.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidInput, RoutingError};
use crate::traits::RoadGraph;

/// Opaque node identifier (e.g. an OpenStreetMap node id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A road-network node. Coordinates are only used for snapping and output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lng: f64,
}

impl Node {
    pub fn new(id: u64, lat: f64, lng: f64) -> Self {
        Self {
            id: NodeId(id),
            lat,
            lng,
        }
    }

    /// Location coordinates (lat, lng).
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// A directed edge with its travel time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
}

impl Edge {
    pub fn new(from: u64, to: u64, cost: f64) -> Self {
        Self {
            from: NodeId(from),
            to: NodeId(to),
            cost,
        }
    }
}

/// Adjacency entry: dense index of the head node and the edge cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutEdge {
    pub head: usize,
    pub cost: f64,
}

/// Serialized form of a [`Graph`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Immutable adjacency-list road network.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<OutEdge>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph, rejecting duplicate nodes, dangling edges, and
    /// negative or non-finite edge costs.
    pub fn new(mut nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, RoutingError> {
        nodes.sort_by_key(|node| node.id);
        if let Some(pair) = nodes.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(InvalidInput::DuplicateNode { node: pair[0].id }.into());
        }

        let index: HashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, i))
            .collect();

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for edge in &edges {
            if !edge.cost.is_finite() || edge.cost < 0.0 {
                return Err(InvalidInput::NegativeEdgeCost {
                    from: edge.from,
                    to: edge.to,
                    cost: edge.cost,
                }
                .into());
            }
            let (Some(&tail), Some(&head)) = (index.get(&edge.from), index.get(&edge.to)) else {
                return Err(InvalidInput::UnknownEdgeEndpoint {
                    from: edge.from,
                    to: edge.to,
                }
                .into());
            };
            adjacency[tail].push(OutEdge {
                head,
                cost: edge.cost,
            });
        }

        Ok(Self {
            nodes,
            index,
            adjacency,
            edge_count: edges.len(),
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl TryFrom<GraphData> for Graph {
    type Error = RoutingError;

    fn try_from(data: GraphData) -> Result<Self, Self::Error> {
        Graph::new(data.nodes, data.edges)
    }
}

impl RoadGraph for Graph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    fn out_edges(&self, index: usize) -> &[OutEdge] {
        &self.adjacency[index]
    }
}
