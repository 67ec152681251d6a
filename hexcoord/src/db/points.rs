//! Coordinate store: one canonical `hex_point` row per distinct (q, r, s).

use rusqlite::{Connection, OptionalExtension, Row, params};

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

use super::{Database, db_err};
use crate::model::{CubeCoord, HexPoint};

const SELECT_POINT: &str = "SELECT id, name, q, r, s FROM hex_point";

/// Find-or-create access to cube coordinates.
#[derive(Clone)]
pub struct PointStore {
    db: Database,
}

impl PointStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Resolve `coord` to its canonical row, inserting it if absent.
    pub fn find_or_create(&self, coord: &CubeCoord) -> HexcoordResult<HexPoint> {
        self.db.with_transaction(|tx| find_or_create_in(tx, coord))
    }

    pub fn get(&self, id: i64) -> HexcoordResult<Option<HexPoint>> {
        let conn = self.db.conn();
        db_err!(
            conn.query_row(
                &format!("{SELECT_POINT} WHERE id = ?1"),
                params![id],
                row_to_point,
            )
            .optional()
        )
    }

    pub fn count(&self) -> HexcoordResult<u64> {
        let conn = self.db.conn();
        let n: i64 =
            db_err!(conn.query_row("SELECT COUNT(*) FROM hex_point", [], |row| row.get(0)))?;
        Ok(n as u64)
    }
}

/// Find-or-create on an open connection or transaction.
///
/// The insert is `ON CONFLICT DO NOTHING` against the UNIQUE (q, r, s)
/// constraint, then the row is re-selected. Two writers resolving the same
/// new coordinate therefore converge on a single row.
pub(crate) fn find_or_create_in(conn: &Connection, coord: &CubeCoord) -> HexcoordResult<HexPoint> {
    coord.validate()?;

    let inserted = db_err!(conn.execute(
        "INSERT INTO hex_point (name, q, r, s) VALUES ('', ?1, ?2, ?3)
         ON CONFLICT(q, r, s) DO NOTHING",
        params![coord.q, coord.r, coord.s],
    ))?;

    let point = db_err!(conn.query_row(
        &format!("{SELECT_POINT} WHERE q = ?1 AND r = ?2 AND s = ?3"),
        params![coord.q, coord.r, coord.s],
        row_to_point,
    ))?;

    tracing::debug!(
        point_id = point.id,
        created = inserted > 0,
        "resolved point {}",
        coord
    );
    Ok(point)
}

pub(crate) fn row_to_point(row: &Row<'_>) -> rusqlite::Result<HexPoint> {
    Ok(HexPoint {
        id: row.get(0)?,
        name: row.get(1)?,
        coord: CubeCoord {
            q: row.get(2)?,
            r: row.get(3)?,
            s: row.get(4)?,
        },
    })
}
