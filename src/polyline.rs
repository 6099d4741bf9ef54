//! Polyline representation for route geometries.
//!
//! This module provides a type for working with polylines as decoded
//! coordinate sequences. Any compact encoding for a map frontend happens in
//! the renderer, not in the planner core.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;
use crate::haversine::haversine_km;
use crate::traits::RoadGraph;

/// A polyline representing a route geometry as decoded coordinates.
///
/// Each point is a (latitude, longitude) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Geometry of a node path. Ids missing from the graph are skipped.
    pub fn from_nodes<G>(graph: &G, nodes: &[NodeId]) -> Self
    where
        G: RoadGraph + ?Sized,
    {
        let points = nodes
            .iter()
            .filter_map(|&id| graph.index_of(id))
            .map(|index| graph.node(index).coords())
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Great-circle length along the points in kilometers.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .sum()
    }
}
