//! Placemark extraction from field and centroid KML documents.

use std::io::ErrorKind;
use std::path::Path;

use hashbrown::HashMap;
use roxmltree::{Document, Node};
use tracing::{debug, info};

use super::parse_coordinates;
use crate::error::LoadError;
use crate::models::{FieldBoundary, Location};

/// KML 2.2 namespace; elements outside it are ignored
const KML_NS: &str = "http://www.opengis.net/kml/2.2";

/// Read a KML document from disk.
///
/// A missing file is reported separately from other I/O failures.
pub fn read_document(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::MissingDocument {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Extract field boundaries from every placemark in the document.
///
/// Placemarks without a `Polygon/outerBoundaryIs/LinearRing/coordinates`
/// ring, with no parsable coordinates, or with a non-positive `fid` are
/// skipped.
pub fn parse_field_boundaries(doc: &Document) -> Vec<FieldBoundary> {
    let mut boundaries = Vec::new();
    let mut placemarks = 0usize;

    for placemark in placemarks_of(doc) {
        placemarks += 1;
        if let Some(boundary) = parse_boundary(placemark) {
            debug!(
                "Parsed field {} ({}): size {}, {} coordinates",
                boundary.id,
                boundary.name,
                boundary.size,
                boundary.polygon.len()
            );
            boundaries.push(boundary);
        }
    }

    info!(
        "Parsed {} field boundaries from {} placemarks",
        boundaries.len(),
        placemarks
    );

    boundaries
}

fn parse_boundary(placemark: Node) -> Option<FieldBoundary> {
    let name = child(placemark, "name")
        .map(element_text)
        .unwrap_or_default();
    let data = SchemaData::from_placemark(placemark);

    let ring_path = ["Polygon", "outerBoundaryIs", "LinearRing", "coordinates"];
    let Some(ring) = path(placemark, &ring_path) else {
        debug!("No polygon coordinates for field {} ({})", data.id, name);
        return None;
    };

    let polygon = parse_coordinates(&element_text(ring));
    if polygon.is_empty() {
        debug!("Empty polygon for field {} ({})", data.id, name);
        return None;
    }

    if data.id <= 0 {
        debug!("Skipped field with invalid id {}: {}", data.id, name);
        return None;
    }

    Some(FieldBoundary {
        id: data.id,
        name,
        size: data.size,
        polygon,
    })
}

/// Extract centroids keyed by `fid` from every placemark in the document.
///
/// Only the first coordinate of each `Point/coordinates` is used. A later
/// placemark with the same id replaces an earlier one.
pub fn parse_centroids(doc: &Document) -> HashMap<i32, Location> {
    let mut centroids = HashMap::new();

    for placemark in placemarks_of(doc) {
        let id = SchemaData::from_placemark(placemark).id;
        if id == 0 {
            debug!("Skipped centroid placemark without fid");
            continue;
        }

        let Some(point) = path(placemark, &["Point", "coordinates"]) else {
            debug!("No point coordinates for centroid {}", id);
            continue;
        };

        let Some(center) = parse_coordinates(&element_text(point)).into_iter().next() else {
            debug!("Empty point for centroid {}", id);
            continue;
        };

        if centroids.insert(id, center).is_some() {
            debug!("Duplicate centroid {} replaced", id);
        }
    }

    info!("Parsed {} centroids", centroids.len());

    centroids
}

/// Typed `SimpleData` values attached to a placemark.
#[derive(Debug, Default, PartialEq)]
struct SchemaData {
    id: i32,
    size: f64,
}

impl SchemaData {
    fn from_placemark(placemark: Node) -> Self {
        let mut data = Self::default();

        let Some(schema) = path(placemark, &["ExtendedData", "SchemaData"]) else {
            return data;
        };

        for simple in schema
            .children()
            .filter(|n| n.has_tag_name((KML_NS, "SimpleData")))
        {
            let value = element_text(simple);
            match simple.attribute("name") {
                Some("fid") => {
                    if let Ok(id) = value.trim().parse() {
                        data.id = id;
                    }
                }
                Some("size") => {
                    if let Ok(size) = value.trim().parse() {
                        data.size = size;
                    }
                }
                _ => {}
            }
        }

        data
    }
}

fn placemarks_of<'a, 'input>(
    doc: &'a Document<'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.descendants()
        .filter(|n| n.has_tag_name((KML_NS, "Placemark")))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((KML_NS, name)))
}

/// Follow a chain of direct KML children
fn path<'a, 'input>(node: Node<'a, 'input>, names: &[&str]) -> Option<Node<'a, 'input>> {
    names.iter().try_fold(node, |current, name| child(current, name))
}

/// All descendant text of an element, concatenated
fn element_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
