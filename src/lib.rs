//! AgroSpace - geospatial queries over agricultural field boundaries
//!
//! This library loads field boundaries and centroids from KML and provides
//! the field catalog used by the HTTP server binary.

pub mod config;
pub mod error;
pub mod kml;
pub mod models;
pub mod pip;

pub use error::{CatalogError, LoadError};
pub use models::{Field, Location, PointLocation};
pub use pip::{FieldCatalog, FieldSources};
