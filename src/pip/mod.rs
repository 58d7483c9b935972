//! Point-in-polygon field lookups.
//!
//! Joins field boundaries with their centroids and answers size, distance
//! and containment queries with a linear scan over the loaded fields.

mod catalog;
pub mod geometry;
mod index;

pub use catalog::{FieldCatalog, FieldSources, LoadStats};
pub use geometry::{contains_point, haversine, EARTH_RADIUS_M};
pub use index::FieldIndex;
