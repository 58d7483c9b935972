//! Joined, ordered field storage.

use hashbrown::HashMap;
use tracing::{info, warn};

use super::geometry::contains_point;
use crate::models::{Field, FieldBoundary, Location};

/// Fields keyed by id, iterated in load order.
///
/// Lookups go through the id map; containment queries scan linearly in
/// load order and stop at the first hit.
#[derive(Debug, Default)]
pub struct FieldIndex {
    fields: Vec<Field>,
    by_id: HashMap<i32, usize>,
}

impl FieldIndex {
    /// Join boundaries with centroids by id.
    ///
    /// Boundaries without a centroid are dropped; centroids without a
    /// boundary are ignored. A repeated boundary id replaces the earlier
    /// field but keeps its position.
    pub fn build(boundaries: Vec<FieldBoundary>, centroids: &HashMap<i32, Location>) -> Self {
        let mut index = Self::default();
        let mut unmatched = 0usize;

        for boundary in boundaries {
            let Some(center) = centroids.get(&boundary.id) else {
                warn!(
                    "Field {} ({}) has no centroid, skipping",
                    boundary.id, boundary.name
                );
                unmatched += 1;
                continue;
            };
            index.insert(boundary.with_center(*center));
        }

        info!(
            "Field index built with {} fields ({} boundaries without centroid)",
            index.len(),
            unmatched
        );

        index
    }

    fn insert(&mut self, field: Field) {
        match self.by_id.get(&field.id) {
            Some(&slot) => {
                warn!("Duplicate field id {}, replacing earlier record", field.id);
                self.fields[slot] = field;
            }
            None => {
                self.by_id.insert(field.id, self.fields.len());
                self.fields.push(field);
            }
        }
    }

    pub fn get(&self, id: i32) -> Option<&Field> {
        self.by_id.get(&id).map(|&slot| &self.fields[slot])
    }

    /// First field, in load order, whose polygon contains the location
    pub fn locate(&self, point: Location) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| contains_point(&field.polygon, point))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
