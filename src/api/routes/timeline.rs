//! Timeline Routes
//!
//! - GET /api/v1/timeline - Per-day event counts for a range and kind
//! - GET /api/v1/detail - Files behind one day of the timeline
//!
//! An unknown kind or an inverted range yields an empty result, not an error.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DetailParams, DetailResponse, TimelineParams, TimelineResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::query::{parse_date, resolve_range, TimelineService};
use crate::storage::TimestampKind;

/// GET /api/v1/timeline
pub async fn timeline(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TimelineParams>,
) -> ApiResult<Json<TimelineResponse>> {
    let store = state.store.snapshot().await;

    let kind = match params.kind.parse::<TimestampKind>() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!(error = %e, "Unknown kind in timeline request");
            return Ok(Json(TimelineResponse {
                kind: params.kind,
                start: None,
                end: None,
                buckets: Vec::new(),
                total: 0,
            }));
        }
    };

    let range = resolve_range(&store, params.start.as_deref(), params.end.as_deref(), kind)?;

    let buckets = match range {
        Some(range) => TimelineService::filter_and_aggregate(&store, range, kind),
        None => Vec::new(),
    };
    let total = buckets.iter().map(|b| b.count).sum();

    Ok(Json(TimelineResponse {
        kind: kind.to_string(),
        start: range.map(|r| r.start),
        end: range.map(|r| r.end),
        buckets,
        total,
    }))
}

/// GET /api/v1/detail
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
) -> ApiResult<Json<DetailResponse>> {
    let target = parse_date(&params.date)?;
    let store = state.store.snapshot().await;

    let files = match params.kind.parse::<TimestampKind>() {
        Ok(kind) => {
            match resolve_range(&store, params.start.as_deref(), params.end.as_deref(), kind)? {
                Some(range) => TimelineService::detail(&store, range, kind, target),
                None => Vec::new(),
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Unknown kind in detail request");
            Vec::new()
        }
    };

    Ok(Json(DetailResponse {
        date: target,
        kind: params.kind,
        files,
    }))
}
