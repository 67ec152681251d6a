//! GET /api/export-shapes-xlsx/

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::blocking;
use crate::server::AppState;
use crate::server::error::Result;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn export_shapes_xlsx(State(state): State<Arc<AppState>>) -> Result<Response> {
    let service = state.service.clone();
    let bytes = blocking(move || service.export_xlsx()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shapes.xlsx\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
