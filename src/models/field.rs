//! Field records as parsed from KML and joined in the catalog.

use serde::{Deserialize, Serialize};

/// Geographic location in degrees.
///
/// No range validation is applied: out-of-range values pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A field boundary placemark, before it is joined with its centroid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldBoundary {
    pub id: i32,
    pub name: String,
    pub size: f64,
    /// Outer ring, implicitly closed (no duplicated closing point required)
    pub polygon: Vec<Location>,
}

impl FieldBoundary {
    /// Attach a centroid, producing the catalog entity
    pub fn with_center(self, center: Location) -> Field {
        Field {
            id: self.id,
            name: self.name,
            size: self.size,
            center,
            polygon: self.polygon,
        }
    }
}

/// A field with both its boundary and its centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: i32,
    pub name: String,
    pub size: f64,
    pub center: Location,
    pub polygon: Vec<Location>,
}

/// Result of locating a point: the field that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointLocation {
    pub id: i32,
    pub name: String,
}

impl From<&Field> for PointLocation {
    fn from(field: &Field) -> Self {
        Self {
            id: field.id,
            name: field.name.clone(),
        }
    }
}
