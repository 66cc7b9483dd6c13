//! Store Routes
//!
//! Metadata about the event store and operator-triggered rebuilds.
//!
//! - GET /api/v1/kinds - Selectable timestamp kinds
//! - GET /api/v1/range - Earliest/latest day for a kind
//! - GET /api/v1/stats - Scan statistics
//! - POST /api/v1/rescan - Rebuild the store from the configured roots

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{KindInfo, RangeParams, RangeResponse, RescanResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::storage::{StoreStats, TimestampKind};

/// GET /api/v1/kinds
pub async fn list_kinds() -> Json<Vec<KindInfo>> {
    Json(TimestampKind::all().iter().copied().map(KindInfo::from).collect())
}

/// GET /api/v1/range
///
/// An unknown kind has no bounds.
pub async fn date_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Json<RangeResponse> {
    let kind = match params.kind.parse::<TimestampKind>() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!(error = %e, "Unknown kind in range request");
            return Json(RangeResponse {
                kind: params.kind,
                start: None,
                end: None,
            });
        }
    };

    let bounds = state.store.snapshot().await.date_bounds(kind);

    Json(RangeResponse {
        kind: kind.to_string(),
        start: bounds.map(|b| b.start),
        end: bounds.map(|b| b.end),
    })
}

/// GET /api/v1/stats
pub async fn store_stats(State(state): State<Arc<AppState>>) -> Json<StoreStats> {
    Json(state.store.snapshot().await.stats().clone())
}

/// POST /api/v1/rescan
///
/// Builds a new store and swaps it in. Queries running against the old
/// store finish on the old data.
pub async fn rescan(State(state): State<Arc<AppState>>) -> ApiResult<Json<RescanResponse>> {
    if !state.config.enable_rescan {
        return Err(ApiError::Disabled("Rescan is disabled".to_string()));
    }

    tracing::info!(roots = state.scan.roots.len(), "Rescan requested");

    let store = state
        .store
        .rescan(state.scan.roots.clone(), state.scan.on_root_error)
        .await?;

    Ok(Json(RescanResponse {
        status: "ok".to_string(),
        stats: store.stats().clone(),
    }))
}
