//! Core data models for the field catalog.

pub mod field;

pub use field::{Field, FieldBoundary, Location, PointLocation};
