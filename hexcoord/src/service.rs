//! Shape service: validates creation requests and drives the coordinate
//! and shape stores inside a single transaction per request.

use serde::Deserialize;

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

use crate::db::{ClearSummary, Database, PointStore, ShapeStore, create_in, find_or_create_in};
use crate::export::{self, ExportTable};
use crate::model::{CubeCoord, HexPoint, NewShape, Shape, ShapeKind};

/// Body of a create-circle request.
#[derive(Clone, Debug, Deserialize)]
pub struct CircleRequest {
    pub origin: CubeCoord,
    pub magnitude: i64,
    #[serde(default)]
    pub points: Option<Vec<CubeCoord>>,
}

/// Body of a create-triangle request.
#[derive(Clone, Debug, Deserialize)]
pub struct TriangleRequest {
    pub vertices: Vec<CubeCoord>,
    #[serde(default)]
    pub magnitude: Option<i64>,
    #[serde(default)]
    pub points: Option<Vec<CubeCoord>>,
}

/// Decode a JSON request body.
///
/// Malformed JSON, missing fields and non-integer values all surface as
/// validation errors.
pub fn parse_request<'a, T: Deserialize<'a>>(body: &'a [u8]) -> HexcoordResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| HexcoordError::Validation(format!("Invalid request body: {}", e)))
}

/// Entry point for shape creation, clearing and export.
#[derive(Clone)]
pub struct ShapeService {
    db: Database,
    points: PointStore,
    shapes: ShapeStore,
}

impl ShapeService {
    pub fn new(db: Database) -> Self {
        Self {
            points: PointStore::new(db.clone()),
            shapes: ShapeStore::new(db.clone()),
            db,
        }
    }

    pub fn points(&self) -> &PointStore {
        &self.points
    }

    pub fn shapes(&self) -> &ShapeStore {
        &self.shapes
    }

    /// Create a circle around `origin` with optional member points.
    ///
    /// The origin is not added to the member list.
    pub fn create_circle(&self, req: &CircleRequest) -> HexcoordResult<Shape> {
        let extra = req.points.as_deref().unwrap_or_default();

        self.db.with_transaction(|tx| {
            let origin = find_or_create_in(tx, &req.origin)?;
            let points = resolve_all(tx, extra)?;
            create_in(
                tx,
                &NewShape {
                    kind: ShapeKind::Circle,
                    origin,
                    magnitude: req.magnitude,
                    points,
                },
            )
        })
    }

    /// Create a triangle from exactly three vertices.
    ///
    /// Vertex 0 is the origin and is also stored as member `idx 0`; the
    /// vertices occupy indices 0..3 and extra points follow from index 3.
    pub fn create_triangle(&self, req: &TriangleRequest) -> HexcoordResult<Shape> {
        if req.vertices.len() != 3 {
            return Err(HexcoordError::Validation(
                "Triangle requires 3 clicks".to_string(),
            ));
        }
        let magnitude = req.magnitude.unwrap_or(0);
        let extra = req.points.as_deref().unwrap_or_default();

        self.db.with_transaction(|tx| {
            let origin = find_or_create_in(tx, &req.vertices[0])?;
            let mut points = resolve_all(tx, &req.vertices)?;
            points.extend(resolve_all(tx, extra)?);
            create_in(
                tx,
                &NewShape {
                    kind: ShapeKind::Triangle,
                    origin,
                    magnitude,
                    points,
                },
            )
        })
    }

    /// Irreversibly delete all shapes, memberships and points.
    pub fn clear_all(&self) -> HexcoordResult<ClearSummary> {
        self.shapes.clear()
    }

    /// Snapshot every shape as a table, ordered by id.
    pub fn export_table(&self) -> HexcoordResult<ExportTable> {
        let shapes = self.shapes.list_with_origin()?;
        Ok(ExportTable::from_shapes(&shapes))
    }

    /// Snapshot every shape as an XLSX workbook.
    pub fn export_xlsx(&self) -> HexcoordResult<Vec<u8>> {
        let table = self.export_table()?;
        let bytes = export::render_xlsx(&table)?;
        tracing::info!(rows = table.rows.len(), bytes = bytes.len(), "Exported shapes");
        Ok(bytes)
    }
}

fn resolve_all(conn: &rusqlite::Connection, coords: &[CubeCoord]) -> HexcoordResult<Vec<HexPoint>> {
    coords.iter().map(|c| find_or_create_in(conn, c)).collect()
}
