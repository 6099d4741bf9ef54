//! Points of interest: the graph nodes a tour must visit.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{InvalidInput, RoutingError};
use crate::graph::NodeId;
use crate::traits::RoadGraph;

/// Ordered, duplicate-free set of graph nodes to visit.
///
/// Index 0 is the depot where the tour starts and ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoiSet {
    nodes: Vec<NodeId>,
}

impl PoiSet {
    /// Validate a POI sequence: at least two entries, no repeated node.
    pub fn new(nodes: Vec<NodeId>) -> Result<Self, RoutingError> {
        if nodes.len() < 2 {
            return Err(InvalidInput::TooFewPoints { count: nodes.len() }.into());
        }
        let mut seen = HashSet::with_capacity(nodes.len());
        for &node in &nodes {
            if !seen.insert(node) {
                return Err(InvalidInput::DuplicatePoint { node }.into());
            }
        }
        Ok(Self { nodes })
    }

    /// Snap raw (lat, lng) locations to their nearest graph nodes.
    ///
    /// Locations that land on an already used node are dropped, keeping the
    /// first occurrence, so nearby addresses collapse into one stop.
    pub fn snap<G>(graph: &G, locations: &[(f64, f64)]) -> Result<Self, RoutingError>
    where
        G: RoadGraph + ?Sized,
    {
        let mut seen = HashSet::with_capacity(locations.len());
        let mut nodes = Vec::with_capacity(locations.len());
        for &(lat, lng) in locations {
            let Some(node) = graph.nearest_node(lat, lng) else {
                return Err(InvalidInput::EmptyGraph {
                    locations: locations.len(),
                }
                .into());
            };
            if seen.insert(node) {
                nodes.push(node);
            }
        }

        let dropped = locations.len() - nodes.len();
        if dropped > 0 {
            debug!(dropped, kept = nodes.len(), "merged locations sharing a nearest node");
        }
        Self::new(nodes)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a valid set holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn depot(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }
}
