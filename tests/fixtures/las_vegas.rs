//! Real Las Vegas / Henderson locations and a synthetic road grid around them.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API. The grid is not
//! the real street network; it only needs to be connected, directed and
//! deterministic.

use tour_planner::haversine::travel_seconds;
use tour_planner::{Edge, Graph, Node};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Depot first, then stops spread across the metro area.
pub const METRO_STOPS: &[Location] = &[
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Beers and Bets", 36.1428945, -115.1573836),
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Location::new("Bootlegger Bistro", 36.0492047, -115.1715744),
    Location::new("Budget Suites South", 36.0366259, -115.1713361),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Tomo Sushi", 36.0992464, -115.1142123),
];

/// Restaurants a few dozen meters apart; several share a grid node.
pub const STRIP_CLUSTER: &[Location] = &[
    Location::new("Bonanno's NY Pizzeria", 36.1165192, -115.1719357),
    Location::new("La Subs & Salads", 36.1162678, -115.1719679),
    Location::new("Center Cut Steakhouse", 36.1162981, -115.1717185),
    Location::new("Paradise Garden Buffet", 36.1170543, -115.1710748),
    Location::new("Marakesh", 36.1177772, -115.1546882),
    Location::new("Musashi", 36.1177743, -115.1545417),
];

/// Somewhere the grid does not reach.
pub const LAKE_MEAD_MARINA: Location = Location::new("Lake Mead Marina", 36.0600, -114.8000);

/// Node id of the isolated marina node in [`metro_grid_with_island`].
pub const ISLAND_NODE: u64 = 1_000_000;

const SOUTH: f64 = 35.98;
const NORTH: f64 = 36.16;
const WEST: f64 = -115.18;
const EAST: f64 = -114.98;

/// Road grid spanning the metro area.
///
/// Northbound and eastbound streets are driven at 40 km/h, southbound and
/// westbound at 50 km/h, so travel times are asymmetric.
pub fn metro_grid(rows: usize, cols: usize) -> Graph {
    let (nodes, edges) = grid_parts(rows, cols);
    Graph::new(nodes, edges).expect("grid graph is valid")
}

/// [`metro_grid`] plus one node with no roads at the marina.
pub fn metro_grid_with_island(rows: usize, cols: usize) -> Graph {
    let (mut nodes, edges) = grid_parts(rows, cols);
    nodes.push(Node::new(ISLAND_NODE, LAKE_MEAD_MARINA.lat, LAKE_MEAD_MARINA.lng));
    Graph::new(nodes, edges).expect("grid graph is valid")
}

fn grid_parts(rows: usize, cols: usize) -> (Vec<Node>, Vec<Edge>) {
    let id = |r: usize, c: usize| (r * cols + c + 1) as u64;
    let lat = |r: usize| SOUTH + (NORTH - SOUTH) * r as f64 / (rows - 1) as f64;
    let lng = |c: usize| WEST + (EAST - WEST) * c as f64 / (cols - 1) as f64;

    let mut nodes = Vec::with_capacity(rows * cols);
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            nodes.push(Node::new(id(r, c), lat(r), lng(c)));
            if r + 1 < rows {
                let (a, b) = ((lat(r), lng(c)), (lat(r + 1), lng(c)));
                edges.push(Edge::new(id(r, c), id(r + 1, c), travel_seconds(a, b, 40.0)));
                edges.push(Edge::new(id(r + 1, c), id(r, c), travel_seconds(b, a, 50.0)));
            }
            if c + 1 < cols {
                let (a, b) = ((lat(r), lng(c)), (lat(r), lng(c + 1)));
                edges.push(Edge::new(id(r, c), id(r, c + 1), travel_seconds(a, b, 40.0)));
                edges.push(Edge::new(id(r, c + 1), id(r, c), travel_seconds(b, a, 50.0)));
            }
        }
    }
    (nodes, edges)
}

/// Coordinates of `locations` in order.
pub fn coords(locations: &[Location]) -> Vec<(f64, f64)> {
    locations.iter().map(Location::coords).collect()
}
