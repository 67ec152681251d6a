//! Shape endpoints: create-circle, create-triangle, clear-db

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Serialize;

use super::blocking;
use crate::server::AppState;
use crate::server::error::Result;
use crate::service::{CircleRequest, TriangleRequest, parse_request};

#[derive(Serialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub shape_id: i64,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// POST /api/create-circle/
///
/// Body: `{origin: {q, r, s}, magnitude: int, points?: [{q, r, s}, ...]}`
pub async fn create_circle(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreatedResponse>> {
    let req: CircleRequest = parse_request(&body)?;
    let service = state.service.clone();
    let shape = blocking(move || service.create_circle(&req)).await?;

    Ok(Json(CreatedResponse {
        ok: true,
        shape_id: shape.id,
    }))
}

/// POST /api/create-triangle/
///
/// Body: `{vertices: [{q, r, s} x3], magnitude?: int, points?: [{q, r, s}, ...]}`
pub async fn create_triangle(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreatedResponse>> {
    let req: TriangleRequest = parse_request(&body)?;
    let service = state.service.clone();
    let shape = blocking(move || service.create_triangle(&req)).await?;

    Ok(Json(CreatedResponse {
        ok: true,
        shape_id: shape.id,
    }))
}

/// POST /api/clear-db/
pub async fn clear_db(State(state): State<Arc<AppState>>) -> Result<Json<OkResponse>> {
    let service = state.service.clone();
    blocking(move || service.clear_all()).await?;
    Ok(Json(OkResponse { ok: true }))
}
