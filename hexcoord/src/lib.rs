//! Recording of hex-grid cube coordinates and the shapes built from them.
//!
//! Layers, leaf to root:
//! - [`db`]: SQLite persistence (coordinate store, shape store)
//! - [`service`]: validation and transactional shape creation
//! - [`export`]: spreadsheet snapshot of all shapes
//! - [`server`]: HTTP endpoints

pub mod db;
pub mod export;
pub mod model;
pub mod runtime;
pub mod server;
pub mod service;

pub use db::{ClearSummary, Database, PointStore, ShapeStore};
pub use hexcoord_shared::errors::{HexcoordError, HexcoordResult};
pub use model::{CubeCoord, HexPoint, NewShape, Shape, ShapeKind, ShapePoint};
pub use runtime::options::HexcoordOptions;
pub use service::ShapeService;
