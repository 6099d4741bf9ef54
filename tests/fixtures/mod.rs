//! Test fixtures for tour-planner.
//!
//! Provides realistic test data:
//! - Real Las Vegas / Henderson locations (from OpenStreetMap)
//! - A synthetic road grid covering the metro area

pub mod las_vegas;

pub use las_vegas::*;
