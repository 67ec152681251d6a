//! Domain types: cube coordinates, points and shapes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

/// A cube coordinate on a hexagonal grid.
///
/// Valid only when `q + r + s == 0`; call [`CubeCoord::validate`] before
/// handing one to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeCoord {
    pub q: i64,
    pub r: i64,
    pub s: i64,
}

impl CubeCoord {
    pub const fn new(q: i64, r: i64, s: i64) -> Self {
        Self { q, r, s }
    }

    /// Check the cube constraint. An overflowing sum is never zero.
    pub fn validate(&self) -> HexcoordResult<()> {
        let sum = self.q.checked_add(self.r).and_then(|qr| qr.checked_add(self.s));
        if sum != Some(0) {
            return Err(HexcoordError::Validation(
                "Cube coords sum should be 0.".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.q, self.r, self.s)
    }
}

/// A persisted cube coordinate. One row per distinct `(q, r, s)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexPoint {
    pub id: i64,
    pub name: String,
    pub coord: CubeCoord,
}

impl fmt::Display for HexPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.coord)
        } else {
            f.write_str(&self.name)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = HexcoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(ShapeKind::Circle),
            "triangle" => Ok(ShapeKind::Triangle),
            other => Err(HexcoordError::Database(format!(
                "unknown shape type '{}'",
                other
            ))),
        }
    }
}

/// A shape anchored at an origin point. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    pub id: i64,
    pub kind: ShapeKind,
    pub origin_id: i64,
    /// Radius for circles; free parameter for triangles. Never negative.
    pub magnitude: i64,
    pub created_at: DateTime<Utc>,
}

/// Ordered membership of a point in a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapePoint {
    pub shape_id: i64,
    pub point_id: i64,
    pub idx: u32,
}

/// Input to [`crate::ShapeStore::create`]: a shape header plus its
/// already-resolved, ordered point list.
#[derive(Clone, Debug)]
pub struct NewShape {
    pub kind: ShapeKind,
    pub origin: HexPoint,
    pub magnitude: i64,
    pub points: Vec<HexPoint>,
}
