//! HTTP endpoint layer.

pub mod error;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use hexcoord_shared::errors::HexcoordResult;

use crate::db::Database;
use crate::runtime::options::HexcoordOptions;
use crate::runtime::shutdown::shutdown_signal;
use crate::service::ShapeService;

pub use routes::build_router;

/// State shared by every handler.
pub struct AppState {
    pub service: ShapeService,
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(service: ShapeService, assets_dir: PathBuf) -> Self {
        Self {
            service,
            assets_dir,
        }
    }
}

/// Open the database and serve until SIGINT/SIGTERM.
pub async fn serve(options: &HexcoordOptions) -> HexcoordResult<()> {
    let addr = options.socket_addr()?;
    let db = Database::open(&options.db_path())?;
    let state = Arc::new(AppState::new(ShapeService::new(db), options.assets_dir()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %addr,
        db = %options.db_path().display(),
        assets = %state.assets_dir.display(),
        "Starting hexcoord server"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
