//! Shape store: shape headers and their ordered point lists.

use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

use super::points::row_to_point;
use super::{Database, db_err};
use crate::model::{HexPoint, NewShape, Shape, ShapeKind, ShapePoint};

/// Row counts removed by [`ShapeStore::clear`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearSummary {
    pub shape_points: usize,
    pub shapes: usize,
    pub points: usize,
}

/// Persistence for shapes and their members.
#[derive(Clone)]
pub struct ShapeStore {
    db: Database,
}

impl ShapeStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a shape and all of its points as one unit.
    pub fn create(&self, shape: &NewShape) -> HexcoordResult<Shape> {
        self.db.with_transaction(|tx| create_in(tx, shape))
    }

    pub fn get(&self, id: i64) -> HexcoordResult<Option<Shape>> {
        let conn = self.db.conn();
        let raw = db_err!(
            conn.query_row(
                "SELECT id, shape_type, origin_id, magnitude, created_at FROM shape WHERE id = ?1",
                params![id],
                |row| {
                    Ok(RawShape {
                        id: row.get(0)?,
                        shape_type: row.get(1)?,
                        origin_id: row.get(2)?,
                        magnitude: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()
        )?;
        raw.map(RawShape::into_shape).transpose()
    }

    /// Members of a shape in ascending `idx` order.
    pub fn points(&self, shape_id: i64) -> HexcoordResult<Vec<(ShapePoint, HexPoint)>> {
        let conn = self.db.conn();
        let mut stmt = db_err!(conn.prepare(
            "SELECT p.id, p.name, p.q, p.r, p.s, sp.idx
             FROM shape_point sp
             JOIN hex_point p ON p.id = sp.point_id
             WHERE sp.shape_id = ?1
             ORDER BY sp.idx ASC"
        ))?;
        let rows = db_err!(stmt.query_map(params![shape_id], |row| {
            let point = row_to_point(row)?;
            let idx: u32 = row.get(5)?;
            Ok((
                ShapePoint {
                    shape_id,
                    point_id: point.id,
                    idx,
                },
                point,
            ))
        }))?;
        db_err!(rows.collect::<Result<Vec<_>, _>>())
    }

    /// Every shape joined with its origin point, ordered by shape id.
    pub fn list_with_origin(&self) -> HexcoordResult<Vec<(Shape, HexPoint)>> {
        let conn = self.db.conn();
        let mut stmt = db_err!(conn.prepare(
            "SELECT p.id, p.name, p.q, p.r, p.s,
                    s.id, s.shape_type, s.origin_id, s.magnitude, s.created_at
             FROM shape s
             JOIN hex_point p ON p.id = s.origin_id
             ORDER BY s.id ASC"
        ))?;
        let rows = db_err!(stmt.query_map([], |row| {
            let origin = row_to_point(row)?;
            let raw = RawShape {
                id: row.get(5)?,
                shape_type: row.get(6)?,
                origin_id: row.get(7)?,
                magnitude: row.get(8)?,
                created_at: row.get(9)?,
            };
            Ok((raw, origin))
        }))?;

        let mut out = Vec::new();
        for row in rows {
            let (raw, origin) = db_err!(row)?;
            out.push((raw.into_shape()?, origin));
        }
        Ok(out)
    }

    pub fn count(&self) -> HexcoordResult<u64> {
        self.count_rows("SELECT COUNT(*) FROM shape")
    }

    pub fn count_points(&self) -> HexcoordResult<u64> {
        self.count_rows("SELECT COUNT(*) FROM shape_point")
    }

    fn count_rows(&self, sql: &str) -> HexcoordResult<u64> {
        let conn = self.db.conn();
        let n: i64 = db_err!(conn.query_row(sql, [], |row| row.get(0)))?;
        Ok(n as u64)
    }

    /// Delete every shape point, shape and hex point in one transaction.
    ///
    /// Deletes children first so the result does not depend on cascades.
    pub fn clear(&self) -> HexcoordResult<ClearSummary> {
        let summary = self.db.with_transaction(|tx| {
            Ok(ClearSummary {
                shape_points: db_err!(tx.execute("DELETE FROM shape_point", []))?,
                shapes: db_err!(tx.execute("DELETE FROM shape", []))?,
                points: db_err!(tx.execute("DELETE FROM hex_point", []))?,
            })
        })?;

        tracing::info!(
            shape_points = summary.shape_points,
            shapes = summary.shapes,
            points = summary.points,
            "Cleared all shape data"
        );
        Ok(summary)
    }
}

/// Insert a shape header plus one `shape_point` row per entry of
/// `shape.points`, with `idx` equal to the entry's position.
///
/// Must run inside a transaction: on error the caller drops it.
pub(crate) fn create_in(conn: &Connection, shape: &NewShape) -> HexcoordResult<Shape> {
    if shape.magnitude < 0 {
        return Err(HexcoordError::Validation(
            "Magnitude must be >= 0.".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(shape.points.len());
    for point in &shape.points {
        if !seen.insert(point.id) {
            return Err(HexcoordError::Validation(format!(
                "Point {} appears more than once in {}",
                point, shape.kind
            )));
        }
    }

    let created_at = Utc::now().trunc_subsecs(6);
    db_err!(conn.execute(
        "INSERT INTO shape (shape_type, origin_id, magnitude, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            shape.kind.as_str(),
            shape.origin.id,
            shape.magnitude,
            created_at.timestamp_micros()
        ],
    ))?;
    let shape_id = conn.last_insert_rowid();

    let mut stmt = db_err!(
        conn.prepare("INSERT INTO shape_point (shape_id, point_id, idx) VALUES (?1, ?2, ?3)")
    )?;
    for (idx, point) in shape.points.iter().enumerate() {
        let idx = u32::try_from(idx).map_err(|_| {
            HexcoordError::Validation(format!("Too many points in {}", shape.kind))
        })?;
        db_err!(stmt.execute(params![shape_id, point.id, idx]))?;
    }

    tracing::info!(
        shape_id,
        kind = %shape.kind,
        origin = %shape.origin,
        magnitude = shape.magnitude,
        points = shape.points.len(),
        "Created shape"
    );

    Ok(Shape {
        id: shape_id,
        kind: shape.kind,
        origin_id: shape.origin.id,
        magnitude: shape.magnitude,
        created_at,
    })
}

struct RawShape {
    id: i64,
    shape_type: String,
    origin_id: i64,
    magnitude: i64,
    created_at: i64,
}

impl RawShape {
    fn into_shape(self) -> HexcoordResult<Shape> {
        let kind: ShapeKind = self.shape_type.parse()?;
        let created_at = DateTime::<Utc>::from_timestamp_micros(self.created_at).ok_or_else(|| {
            HexcoordError::Database(format!(
                "shape {} has invalid created_at {}",
                self.id, self.created_at
            ))
        })?;
        Ok(Shape {
            id: self.id,
            kind,
            origin_id: self.origin_id,
            magnitude: self.magnitude,
            created_at,
        })
    }
}
