//! FTV REST API
//!
//! HTTP API layer for the file timeline, built with Axum. It is a thin
//! transport over [`crate::query::TimelineService`]; every request carries
//! its own range and kind.
//!
//! # Endpoints
//!
//! ## Timeline
//! - `GET /api/v1/timeline?start=&end=&kind=` - Per-day event counts
//! - `GET /api/v1/detail?start=&end=&kind=&date=` - Files on one day
//!
//! ## Export
//! - `GET /api/v1/export?format=csv` - Download the full store
//!
//! ## Store
//! - `GET /api/v1/kinds` - Selectable timestamp kinds
//! - `GET /api/v1/range?kind=` - Earliest/latest day for a kind
//! - `GET /api/v1/stats` - Scan statistics
//! - `POST /api/v1/rescan` - Rebuild the store from the configured roots
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use ftv::api::{serve, AppState};
//! use ftv::config::Config;
//! use ftv::storage::EventStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let store = EventStore::build(&config.scan.roots)?;
//!
//!     let state = AppState::new(store, config.scan.clone(), config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Timeline routes
        .route("/timeline", get(routes::timeline::timeline))
        .route("/detail", get(routes::timeline::detail))
        // Export routes
        .route("/export", get(routes::export::export_data))
        // Store routes
        .route("/kinds", get(routes::store::list_kinds))
        .route("/range", get(routes::store::date_range))
        .route("/stats", get(routes::store::store_stats))
        .route("/rescan", post(routes::store::rescan));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive CORS unless specific origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(parsed))
    }
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("FTV API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("FTV API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::TimelineResponse;
    use crate::config::ScanConfig;
    use crate::storage::{EventStore, FileEvent};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use tower::util::ServiceExt;

    fn event(name: &str, modified: (i32, u32, u32)) -> FileEvent {
        let at = NaiveDate::from_ymd_opt(modified.0, modified.1, modified.2)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        FileEvent {
            folder: "Data".to_string(),
            file_name: name.to_string(),
            created_time: at,
            modified_time: at,
            accessed_time: at,
            file_path: format!("/cases/Data/{name}"),
        }
    }

    fn create_test_app_with(store: EventStore, config: ApiConfig) -> Router {
        build_router(AppState::new(store, ScanConfig::default(), config))
    }

    fn create_test_app() -> Router {
        let store = EventStore::from_events(vec![
            event("A", (2024, 1, 1)),
            event("B", (2024, 1, 1)),
            event("C", (2024, 1, 2)),
        ]);
        create_test_app_with(store, ApiConfig::default())
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = send_get(create_test_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = send_get(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["events"], 3);
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_timeline() {
        let (status, body) = send_get(
            create_test_app(),
            "/api/v1/timeline?start=2024-01-01&end=2024-01-02&kind=modified",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response: TimelineResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.buckets.len(), 2);
        assert_eq!(response.buckets[0].count, 2);
        assert_eq!(response.buckets[1].count, 1);
        assert_eq!(response.total, 3);
    }

    #[tokio::test]
    async fn test_timeline_defaults_to_full_range() {
        let (status, body) = send_get(create_test_app(), "/api/v1/timeline").await;
        assert_eq!(status, StatusCode::OK);

        let response: TimelineResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.kind, "modified");
        assert_eq!(response.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(response.end, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(response.total, 3);
    }

    #[tokio::test]
    async fn test_timeline_inverted_range_is_empty() {
        let (status, body) = send_get(
            create_test_app(),
            "/api/v1/timeline?start=2024-01-02&end=2024-01-01",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response: TimelineResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.buckets.is_empty());
    }

    #[tokio::test]
    async fn test_timeline_unknown_kind_is_empty() {
        let (status, body) = send_get(create_test_app(), "/api/v1/timeline?kind=birth").await;
        assert_eq!(status, StatusCode::OK);

        let response: TimelineResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.buckets.is_empty());
    }

    #[tokio::test]
    async fn test_timeline_bad_date() {
        let (status, _) = send_get(create_test_app(), "/api/v1/timeline?start=01/02/2024").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_timeline_empty_store() {
        let app = create_test_app_with(EventStore::default(), ApiConfig::default());
        let (status, body) = send_get(app, "/api/v1/timeline").await;
        assert_eq!(status, StatusCode::OK);

        let response: TimelineResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.buckets.is_empty());
        assert_eq!(response.start, None);
    }

    #[tokio::test]
    async fn test_detail() {
        let (status, body) = send_get(
            create_test_app(),
            "/api/v1/detail?start=2024-01-01&end=2024-01-02&kind=modified&date=2024-01-01",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let files = json["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["file_name"], "A");
        assert_eq!(files[1]["file_path"], "/cases/Data/B");
    }

    #[tokio::test]
    async fn test_detail_requires_date() {
        let (status, _) = send_get(create_test_app(), "/api/v1/detail?kind=modified").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/csv");
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"file_metadata.csv\""
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let events = crate::export::read_csv(bytes.as_ref()).unwrap();
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_export_unknown_format() {
        let (status, _) = send_get(create_test_app(), "/api/v1/export?format=xlsx").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_disabled() {
        let config = ApiConfig {
            enable_export: false,
            ..Default::default()
        };
        let app = create_test_app_with(EventStore::default(), config);

        let (status, _) = send_get(app, "/api/v1/export").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_kinds() {
        let (status, body) = send_get(create_test_app(), "/api/v1/kinds").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let values: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k["value"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(values, vec!["created", "modified", "accessed"]);
    }

    #[tokio::test]
    async fn test_range() {
        let (status, body) = send_get(create_test_app(), "/api/v1/range?kind=accessed").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["start"], "2024-01-01");
        assert_eq!(json["end"], "2024-01-02");
    }

    #[tokio::test]
    async fn test_range_unknown_kind_has_no_bounds() {
        let (status, body) = send_get(create_test_app(), "/api/v1/range?kind=birth").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], "birth");
        assert!(json["start"].is_null());
        assert!(json["end"].is_null());
    }

    #[tokio::test]
    async fn test_rescan_swaps_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("new.txt"), b"x").unwrap();

        let scan = ScanConfig {
            roots: vec![dir.path().to_path_buf()],
            ..Default::default()
        };
        let state = AppState::new(EventStore::default(), scan, ApiConfig::default());
        let handle = state.store.clone();
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/rescan")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(handle.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rescan_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let scan = ScanConfig {
            roots: vec![dir.path().join("gone")],
            ..Default::default()
        };
        let app = build_router(AppState::new(EventStore::default(), scan, ApiConfig::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/rescan")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
