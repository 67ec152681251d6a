//! Template page and its static assets, read from the assets directory
//! on every request.

use std::io::ErrorKind;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use hexcoord_shared::errors::HexcoordError;

use crate::server::AppState;
use crate::server::error::Result;

pub async fn home_page(State(state): State<Arc<AppState>>) -> Result<Response> {
    serve_asset(&state, "home.html", "text/html; charset=utf-8").await
}

pub async fn template_page(State(state): State<Arc<AppState>>) -> Result<Response> {
    serve_asset(&state, "template.html", "text/html; charset=utf-8").await
}

pub async fn style_css(State(state): State<Arc<AppState>>) -> Result<Response> {
    serve_asset(&state, "style.css", "text/css; charset=utf-8").await
}

pub async fn ops_js(State(state): State<Arc<AppState>>) -> Result<Response> {
    serve_asset(&state, "ops.js", "application/javascript; charset=utf-8").await
}

async fn serve_asset(state: &AppState, file: &str, content_type: &'static str) -> Result<Response> {
    let path = state.assets_dir.join(file);
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => Ok(([(header::CONTENT_TYPE, content_type)], text).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(HexcoordError::NotFound(format!("{} not found", file)).into())
        }
        Err(e) => Err(HexcoordError::from(e).into()),
    }
}
