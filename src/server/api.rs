//! `/api/fields` handlers and their request/response shapes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use agrospace::{CatalogError, Field, FieldCatalog, Location, PointLocation};

pub type AppState = Arc<FieldCatalog>;

#[derive(Debug, Serialize)]
pub struct FieldResponse {
    pub id: i32,
    pub name: String,
    pub size: f64,
    pub locations: FieldLocations,
}

#[derive(Debug, Serialize)]
pub struct FieldLocations {
    pub center: Location,
    pub polygon: Vec<Location>,
}

impl From<Field> for FieldResponse {
    fn from(field: Field) -> Self {
        Self {
            id: field.id,
            name: field.name,
            size: field.size,
            locations: FieldLocations {
                center: field.center,
                polygon: field.polygon,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRequest {
    pub field_id: i32,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct PointLocationRequest {
    pub lat: f64,
    pub lng: f64,
}

/// A matching field, or `false` when the point is outside every field
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PointLocationResponse {
    Found(PointLocation),
    Missing(bool),
}

impl From<Option<PointLocation>> for PointLocationResponse {
    fn from(found: Option<PointLocation>) -> Self {
        match found {
            Some(location) => PointLocationResponse::Found(location),
            None => PointLocationResponse::Missing(false),
        }
    }
}

pub enum ApiError {
    NotFound,
    Catalog(CatalogError),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Field not found" })),
            )
                .into_response(),
            ApiError::Catalog(err) if err.is_invalid_argument() => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            ApiError::Catalog(err) => {
                tracing::error!("Field query failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error", "message": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// List all fields
pub async fn list_fields(
    State(catalog): State<AppState>,
) -> Result<Json<Vec<FieldResponse>>, ApiError> {
    let fields = catalog.get_all_fields()?;
    Ok(Json(fields.into_iter().map(FieldResponse::from).collect()))
}

/// Size of a single field
pub async fn field_size(
    State(catalog): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<f64>, ApiError> {
    catalog
        .get_field_size(id)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Distance from a field's centroid, in meters
pub async fn distance(
    State(catalog): State<AppState>,
    Json(request): Json<DistanceRequest>,
) -> Result<Json<f64>, ApiError> {
    let meters = catalog.calculate_distance(request.field_id, request.lat, request.lng)?;
    Ok(Json(meters))
}

/// Which field, if any, contains a point
pub async fn point_location(
    State(catalog): State<AppState>,
    Json(request): Json<PointLocationRequest>,
) -> Result<Json<PointLocationResponse>, ApiError> {
    let found = catalog.is_point_in_field(request.lat, request.lng)?;
    Ok(Json(found.into()))
}
