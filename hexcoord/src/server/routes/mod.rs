//! HTTP route handlers and router configuration

mod assets;
mod export;
mod shapes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

use super::AppState;

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Landing page, template page and its assets
        .route("/", get(assets::home_page))
        .route("/template/", get(assets::template_page))
        .route("/template/style.css", get(assets::style_css))
        .route("/template/ops.js", get(assets::ops_js))
        // Shape API
        .route("/api/create-circle/", post(shapes::create_circle))
        .route("/api/create-triangle/", post(shapes::create_triangle))
        .route("/api/clear-db/", post(shapes::clear_db))
        .route("/api/export-shapes-xlsx/", get(export::export_shapes_xlsx))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run synchronous database work off the async runtime.
async fn blocking<T, F>(f: F) -> super::error::Result<T>
where
    F: FnOnce() -> HexcoordResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result: Result<T, HexcoordError> = tokio::task::spawn_blocking(f).await?;
    Ok(result?)
}
