//! tour-planner core
//!
//! Road-network tour planning: all-pairs travel times between points of
//! interest via Dijkstra, then a single-vehicle tour through them via
//! construction heuristics and local search.

pub mod config;
pub mod deadline;
pub mod error;
pub mod graph;
pub mod haversine;
pub mod materialize;
pub mod matrix;
pub mod planner;
pub mod poi;
pub mod polyline;
pub mod shortest_path;
pub mod solver;
pub mod traits;

pub use config::PlannerConfig;
pub use deadline::{Completion, Deadline};
pub use error::{ConfigError, InvalidInput, RoutingError};
pub use graph::{Edge, Graph, GraphData, Node, NodeId};
pub use matrix::{DistanceMatrix, UNREACHABLE_COST};
pub use planner::{Planner, TourPlan};
pub use poi::PoiSet;
pub use solver::{Route, Solution};
pub use traits::RoadGraph;
