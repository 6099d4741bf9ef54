//! Command-line front end: plan a tour over a road graph stored as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tour_planner::polyline::Polyline;
use tour_planner::{Completion, Graph, GraphData, Planner, PlannerConfig, TourPlan};

#[derive(Debug, Parser)]
#[command(name = "tour-planner", about = "Plan a round trip through road-network stops")]
struct Args {
    /// Road graph JSON: {"nodes": [{"id", "lat", "lng"}], "edges": [{"from", "to", "cost"}]}
    #[arg(long)]
    graph: PathBuf,

    /// Stops JSON: [[lat, lng], ...]; the first stop is the depot.
    #[arg(long)]
    stops: PathBuf,

    /// Planner config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the route geometry here as JSON.
    #[arg(long)]
    output: Option<PathBuf>,
}

/// What the map renderer consumes.
#[derive(Debug, Serialize)]
struct RenderedRoute {
    order: Vec<usize>,
    total_travel_time: f64,
    completion: Completion,
    segments: Vec<RenderedSegment>,
}

#[derive(Debug, Serialize)]
struct RenderedSegment {
    from: usize,
    to: usize,
    length_km: f64,
    geometry: Polyline,
}

impl RenderedRoute {
    fn new(graph: &Graph, plan: &TourPlan) -> Self {
        let segments = plan
            .segments
            .iter()
            .map(|segment| {
                let geometry = segment.polyline(graph);
                RenderedSegment {
                    from: segment.from,
                    to: segment.to,
                    length_km: geometry.length_km(),
                    geometry,
                }
            })
            .collect();
        Self {
            order: plan.solution.route.stops().to_vec(),
            total_travel_time: plan.total_cost(),
            completion: plan.completion,
            segments,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tour_planner=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlannerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };

    let graph_json = fs::read_to_string(&args.graph)
        .with_context(|| format!("reading graph {}", args.graph.display()))?;
    let graph_data: GraphData = serde_json::from_str(&graph_json).context("parsing graph")?;
    let graph = Graph::try_from(graph_data)?;

    let stops_json = fs::read_to_string(&args.stops)
        .with_context(|| format!("reading stops {}", args.stops.display()))?;
    let stops: Vec<(f64, f64)> = serde_json::from_str(&stops_json).context("parsing stops")?;

    let plan = Planner::new(config).plan_locations(&graph, &stops)?;

    println!("Optimized route (POI indices): {:?}", plan.solution.route.stops());
    println!("Optimized route (node ids): {:?}", plan.stop_nodes());
    println!("Total travel time: {} seconds", plan.total_cost());
    if plan.completion == Completion::Cancelled {
        println!("Time limit reached; this is the best route found so far.");
    }

    if let Some(path) = &args.output {
        let rendered = RenderedRoute::new(&graph, &plan);
        let json = serde_json::to_string_pretty(&rendered)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Route geometry saved to {}", path.display());
    }

    Ok(())
}
