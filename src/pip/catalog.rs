//! Field catalog: lazily loaded, read-only field queries.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use roxmltree::Document;
use tracing::{debug, error, info};

use super::geometry::haversine;
use super::FieldIndex;
use crate::error::{CatalogError, LoadError};
use crate::kml::{parse_centroids, parse_field_boundaries, read_document};
use crate::models::{Field, Location, PointLocation};

/// Locations of the two KML documents the catalog is built from
#[derive(Debug, Clone)]
pub struct FieldSources {
    pub fields: PathBuf,
    pub centroids: PathBuf,
}

/// Counts gathered during the load pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Valid boundary placemarks in the fields document
    pub boundaries: usize,
    /// Distinct centroid ids in the centroids document
    pub centroids: usize,
    /// Fields left after joining boundaries with centroids
    pub fields: usize,
}

struct Loaded {
    index: FieldIndex,
    stats: LoadStats,
}

/// Immutable set of fields, loaded once on first use.
///
/// The first caller to touch the catalog parses both documents while
/// concurrent callers wait; afterwards every query is a plain read. A failed
/// load is cached and returned by every later call.
pub struct FieldCatalog {
    sources: FieldSources,
    state: OnceLock<Result<Loaded, Arc<LoadError>>>,
    load_count: AtomicUsize,
}

impl FieldCatalog {
    /// Create an unloaded catalog; nothing is read until first use
    pub fn new(sources: FieldSources) -> Self {
        Self {
            sources,
            state: OnceLock::new(),
            load_count: AtomicUsize::new(0),
        }
    }

    /// Load both documents if this has not happened yet.
    pub fn load(&self) -> Result<(), CatalogError> {
        self.loaded().map(|_| ())
    }

    /// Snapshot of all fields in load order
    pub fn get_all_fields(&self) -> Result<Vec<Field>, CatalogError> {
        Ok(self.index()?.fields().to_vec())
    }

    /// Size of a field, `None` if the id is unknown
    pub fn get_field_size(&self, id: i32) -> Result<Option<f64>, CatalogError> {
        Ok(self.index()?.get(id).map(|field| field.size))
    }

    /// Distance in meters from a field's centroid to the given point.
    ///
    /// An unknown id is a caller error: [`CatalogError::InvalidFieldId`].
    pub fn calculate_distance(&self, id: i32, lat: f64, lng: f64) -> Result<f64, CatalogError> {
        let field = self
            .index()?
            .get(id)
            .ok_or(CatalogError::InvalidFieldId(id))?;

        Ok(haversine(field.center, Location::new(lat, lng)))
    }

    /// First field (in load order) containing the point.
    ///
    /// Overlapping fields are not disambiguated.
    pub fn is_point_in_field(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Option<PointLocation>, CatalogError> {
        let found = self
            .index()?
            .locate(Location::new(lat, lng))
            .map(PointLocation::from);

        debug!("Point ({}, {}) located in {:?}", lat, lng, found);

        Ok(found)
    }

    pub fn stats(&self) -> Result<LoadStats, CatalogError> {
        Ok(self.loaded()?.stats)
    }

    /// Number of parsing passes that have run (0 before first use, then 1)
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    pub fn sources(&self) -> &FieldSources {
        &self.sources
    }

    fn index(&self) -> Result<&FieldIndex, CatalogError> {
        Ok(&self.loaded()?.index)
    }

    fn loaded(&self) -> Result<&Loaded, CatalogError> {
        let state = match self.state.get() {
            Some(state) => state,
            None => self.state.get_or_init(|| {
                self.read_sources().map_err(|e| {
                    error!("Failed to load fields: {}", e);
                    Arc::new(e)
                })
            }),
        };

        state
            .as_ref()
            .map_err(|e| CatalogError::Load(Arc::clone(e)))
    }

    fn read_sources(&self) -> Result<Loaded, LoadError> {
        self.load_count.fetch_add(1, Ordering::SeqCst);

        let FieldSources { fields, centroids } = &self.sources;
        info!(
            "Loading fields from {} and {}",
            fields.display(),
            centroids.display()
        );

        // Both documents must exist before anything is parsed
        let fields_text = read_document(fields)?;
        let centroids_text = read_document(centroids)?;

        let fields_doc = Document::parse(&fields_text).map_err(|source| LoadError::Xml {
            path: fields.clone(),
            source,
        })?;
        let centroids_doc = Document::parse(&centroids_text).map_err(|source| LoadError::Xml {
            path: centroids.clone(),
            source,
        })?;

        let boundaries = parse_field_boundaries(&fields_doc);
        let centers = parse_centroids(&centroids_doc);

        let mut stats = LoadStats {
            boundaries: boundaries.len(),
            centroids: centers.len(),
            fields: 0,
        };

        let index = FieldIndex::build(boundaries, &centers);
        stats.fields = index.len();

        info!("Loaded {} fields", stats.fields);

        Ok(Loaded { index, stats })
    }
}
