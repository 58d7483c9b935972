//! KML ingestion for field boundaries and centroids.
//!
//! Placemarks carry their metadata in `ExtendedData/SchemaData/SimpleData`
//! entries; `fid` keys a placemark to its field and `size` holds the area.

mod coordinates;
mod document;

pub use coordinates::parse_coordinates;
pub use document::{parse_centroids, parse_field_boundaries, read_document};
