//! Error types for document loading and catalog queries.

use std::path::PathBuf;
use std::sync::Arc;

/// Fatal failure while loading the field documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("KML document not found: {}", path.display())]
    MissingDocument { path: PathBuf },
    #[error("Failed to read KML document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse KML document {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

/// Error returned by catalog operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// The one-time load failed; every later call reports the same failure.
    #[error("Field catalog failed to load: {0}")]
    Load(#[source] Arc<LoadError>),
    /// The caller passed an id that is not in the catalog.
    #[error("Field with id {0} not found")]
    InvalidFieldId(i32),
}

impl CatalogError {
    /// Whether this is a caller mistake rather than a server-side failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CatalogError::InvalidFieldId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_classification() {
        assert!(CatalogError::InvalidFieldId(9).is_invalid_argument());

        let load = CatalogError::Load(Arc::new(LoadError::MissingDocument {
            path: PathBuf::from("coord/fields.kml"),
        }));
        assert!(!load.is_invalid_argument());
        assert!(load.to_string().contains("coord/fields.kml"));
    }
}
