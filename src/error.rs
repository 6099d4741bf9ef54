//! Error taxonomy for routing requests.
//!
//! Unreachable POI pairs are not errors (they become sentinel costs in the
//! distance matrix) and cancellation is reported through
//! [`Completion`](crate::deadline::Completion) on the result instead.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors returned by routing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// The caller supplied input that cannot be routed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// No feasible route could be constructed.
    #[error("no solution: the distance matrix needs at least two points")]
    NoSolution,
}

impl RoutingError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RoutingError::InvalidInput(_))
    }
}

/// Reasons an input was rejected before any computation started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("at least two points of interest are required, got {count}")]
    TooFewPoints { count: usize },

    #[error("point of interest {node} appears more than once")]
    DuplicatePoint { node: NodeId },

    #[error("node {node} is not part of the graph")]
    UnknownNode { node: NodeId },

    #[error("node {node} is defined more than once")]
    DuplicateNode { node: NodeId },

    #[error("edge {from} -> {to} references a missing node")]
    UnknownEdgeEndpoint { from: NodeId, to: NodeId },

    /// Edge costs must be finite and non-negative for Dijkstra.
    #[error("edge {from} -> {to} has invalid cost {cost}")]
    NegativeEdgeCost { from: NodeId, to: NodeId, cost: f64 },

    #[error("malformed distance matrix: {0}")]
    Matrix(String),

    #[error("malformed route: {0}")]
    Route(String),

    /// The sentinel must stay above every real route cost.
    #[error("unreachable cost must be finite and positive, got {cost}")]
    UnreachableCost { cost: f64 },

    #[error("the road graph has no nodes to snap {locations} locations to")]
    EmptyGraph { locations: usize },
}

/// Errors raised while loading a [`PlannerConfig`](crate::config::PlannerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] InvalidInput),
}
