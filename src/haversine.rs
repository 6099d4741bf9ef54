//! Great-circle distance helpers.
//!
//! Used for snapping raw locations onto the road network and for geometry
//! lengths. Route costs always come from the graph, never from here.

/// Average driving speed assumption for straight-line time estimates.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Straight-line travel time in seconds at `speed_kmh`.
///
/// Handy for graph loaders that only know road geometry and a speed.
pub fn travel_seconds(from: (f64, f64), to: (f64, f64), speed_kmh: f64) -> f64 {
    let hours = haversine_km(from, to) / speed_kmh;
    hours * 3600.0
}
