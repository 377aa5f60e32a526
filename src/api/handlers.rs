use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::Claims;
use crate::errors::AppError;
use crate::models::{BoundingBox, NewVendor, StatusUpdate, Vendor};
use crate::AppState;

// ── Request / Response DTOs ──────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Lenient bounds: anything less than all four parameters means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct LenientBounds {
    #[serde(rename = "minLat")]
    pub min_lat: Option<f64>,
    #[serde(rename = "maxLat")]
    pub max_lat: Option<f64>,
    #[serde(rename = "minLng")]
    pub min_lng: Option<f64>,
    #[serde(rename = "maxLng")]
    pub max_lng: Option<f64>,
}

/// Strict bounds: all four parameters required, so a missing or malformed
/// bound is a 400 from the extractor rather than a silently wider query.
#[derive(Debug, Deserialize)]
pub struct StrictBounds {
    #[serde(rename = "minLat")]
    pub min_lat: f64,
    #[serde(rename = "maxLat")]
    pub max_lat: f64,
    #[serde(rename = "minLng")]
    pub min_lng: f64,
    #[serde(rename = "maxLng")]
    pub max_lng: f64,
}

// ── Handlers ─────────────────────────────────────────────────

/// POST /api/auth/login — exchange the credential pair for a bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state.issuer.login(&payload.username, &payload.password)?;
    Ok(Json(LoginResponse { token }))
}

/// GET /api/vendors — all vendors, optionally filtered by a bounding box
pub async fn list_vendors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LenientBounds>,
) -> Result<Json<Vec<Vendor>>, AppError> {
    let bounds = BoundingBox::from_parts(
        params.min_lat,
        params.max_lat,
        params.min_lng,
        params.max_lng,
    );

    if bounds.is_none()
        && (params.min_lat.is_some()
            || params.max_lat.is_some()
            || params.min_lng.is_some()
            || params.max_lng.is_some())
    {
        tracing::debug!(?params, "partial bounding box ignored");
    }

    let vendors = state.store.list(bounds.as_ref()).await?;
    Ok(Json(vendors))
}

/// GET /api/vendors/bounds — vendors within a required bounding box
pub async fn vendors_in_bounds(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StrictBounds>,
) -> Result<Json<Vec<Vendor>>, AppError> {
    let bounds = BoundingBox {
        min_lat: params.min_lat,
        max_lat: params.max_lat,
        min_lng: params.min_lng,
        max_lng: params.max_lng,
    };

    let vendors = state.store.list(Some(&bounds)).await?;
    Ok(Json(vendors))
}

/// GET /api/vendors/:id — point lookup
pub async fn get_vendor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vendor>, AppError> {
    let vendor = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(vendor))
}

/// POST /api/vendors — create a vendor; the store assigns the id
pub async fn create_vendor(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<NewVendor>,
) -> Result<(StatusCode, Json<Vendor>), AppError> {
    let vendor = state.store.insert(&payload).await?;
    tracing::info!(id = vendor.id, subject = %claims.sub, "vendor created");
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// PATCH /api/vendors/:id — replace the status field
pub async fn update_vendor_status(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Vendor>, AppError> {
    let vendor = state
        .store
        .update_status(id, &payload.status)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(id, subject = %claims.sub, status = %vendor.status, "vendor status updated");
    Ok(Json(vendor))
}

/// DELETE /api/vendors/:id — remove a vendor
pub async fn delete_vendor(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(id).await? {
        tracing::info!(id, subject = %claims.sub, "vendor deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
