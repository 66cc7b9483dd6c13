//! Export Routes
//!
//! Full export of the event store as a file download.
//!
//! - GET /api/v1/export - Export every record (csv, json or ndjson)

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::export::ExportFormat;
use crate::query::TimelineService;

/// GET /api/v1/export
///
/// Always exports the whole store; timeline filters do not apply.
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Disabled("Export feature is disabled".to_string()));
    }

    let format: ExportFormat = params.format.parse()?;
    let store = state.store.snapshot().await;

    // Serialization is CPU bound on large stores
    let body = tokio::task::spawn_blocking(move || TimelineService::export_all(&store, format))
        .await
        .map_err(|e| ApiError::Internal(format!("Export task failed: {}", e)))??;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.filename()),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
