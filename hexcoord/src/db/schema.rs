//! Database schema definitions.
//!
//! Three tables: `hex_point` (one row per distinct cube coordinate),
//! `shape` (header rows) and `shape_point` (ordered membership).
//! Uniqueness and the cube constraint are enforced here as well as in code.

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// HexPoint table schema.
///
/// The UNIQUE constraint on (q, r, s) backs find-or-create upserts.
pub const HEX_POINT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS hex_point (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    q INTEGER NOT NULL,
    r INTEGER NOT NULL,
    s INTEGER NOT NULL,
    CHECK (q + r + s = 0),
    UNIQUE (q, r, s)
);
"#;

/// Shape table schema.
///
/// created_at is microseconds since the Unix epoch (UTC).
pub const SHAPE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS shape (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    shape_type TEXT NOT NULL CHECK (shape_type IN ('circle', 'triangle')),
    origin_id INTEGER NOT NULL,
    magnitude INTEGER NOT NULL CHECK (magnitude >= 0),
    created_at INTEGER NOT NULL,
    FOREIGN KEY (origin_id) REFERENCES hex_point(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_shape_origin ON shape(origin_id);
"#;

/// ShapePoint table schema.
pub const SHAPE_POINT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS shape_point (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    shape_id INTEGER NOT NULL,
    point_id INTEGER NOT NULL,
    idx INTEGER NOT NULL CHECK (idx >= 0),
    UNIQUE (shape_id, idx),
    UNIQUE (shape_id, point_id),
    FOREIGN KEY (shape_id) REFERENCES shape(id) ON DELETE CASCADE,
    FOREIGN KEY (point_id) REFERENCES hex_point(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_shape_point_point ON shape_point(point_id);
"#;

/// Get all schema creation statements.
pub fn all_schemas() -> Vec<&'static str> {
    vec![
        SCHEMA_VERSION_TABLE,
        HEX_POINT_TABLE,
        SHAPE_TABLE,
        SHAPE_POINT_TABLE,
    ]
}
