//! Dashboard REST API
//!
//! HTTP API layer serving the resolved dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Resolved view model and its origin
//! - `GET /api/v1/charts` - Every chart configuration
//! - `GET /api/v1/charts/:id` - One chart configuration
//! - `GET /api/v1/map` - Map configuration
//! - `GET /api/v1/slots` - Text slot writes
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use community_dashboard::api::{serve, AppState};
//! use community_dashboard::config::Config;
//! use community_dashboard::model;
//! use community_dashboard::render::DashboardState;
//! use community_dashboard::source::DataOrigin;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dashboard = DashboardState::build(
//!         model::resolve(None),
//!         DataOrigin::Defaults { reason: "example".into() },
//!         &config.map,
//!     );
//!
//!     serve(AppState::new(Arc::new(dashboard)), &config.api).await?;
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
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/charts", get(routes::dashboard::list_charts))
        .route("/charts/:id", get(routes::dashboard::get_chart))
        .route("/map", get(routes::dashboard::get_map))
        .route("/slots", get(routes::dashboard::get_slots));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(shared_state)
}

/// CORS for the configured origins; no origins means any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state, config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard API shut down gracefully");
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
                tracing::error!("Failed to install signal handler: {}", e);
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
    use crate::model::{self, defaults};
    use crate::project::MapSettings;
    use crate::render::DashboardState;
    use crate::source::DataOrigin;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app(origin: DataOrigin) -> Router {
        let vm = model::resolve_json(Some(&json!({ "heroStats": { "population": 12500 } })));
        let dashboard = DashboardState::build(vm, origin, &MapSettings::default());
        build_router(AppState::new(Arc::new(dashboard)), &ApiConfig::default())
    }

    fn defaults_app() -> Router {
        create_test_app(DataOrigin::Defaults {
            reason: "test".to_string(),
        })
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(defaults_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_origin() {
        let response = get(defaults_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["data_origin"]["kind"], "defaults");

        let loaded = create_test_app(DataOrigin::Loaded {
            location: "./data/dashboard-metrics.json".to_string(),
            dropped: Vec::new(),
        });
        let body = json_body(get(loaded, "/health").await).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_health_degraded_when_fields_dropped() {
        let partial = create_test_app(DataOrigin::Loaded {
            location: "./data/dashboard-metrics.json".to_string(),
            dropped: vec!["chartData.dentalAccess.years".to_string()],
        });
        let body = json_body(get(partial, "/health").await).await;

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["data_origin"]["kind"], "loaded");
        assert_eq!(
            body["data_origin"]["dropped"][0],
            "chartData.dentalAccess.years"
        );
    }

    #[tokio::test]
    async fn test_dashboard() {
        let response = get(defaults_app(), "/api/v1/dashboard").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["view_model"]["hero"]["population"], 12500);
        assert_eq!(
            body["view_model"]["hero"]["pillars"],
            defaults::hero_stats().pillars
        );
        assert!(body["built_at"].is_string());
    }

    #[tokio::test]
    async fn test_list_charts() {
        let body = json_body(get(defaults_app(), "/api/v1/charts").await).await;
        assert_eq!(body["total"], 7);
        assert_eq!(body["charts"]["educationChart"]["type"], "radar");
        assert_eq!(
            body["charts"]["educationChart"]["options"]["animation"]["durationMs"],
            1500
        );
    }

    #[tokio::test]
    async fn test_get_chart() {
        let response = get(defaults_app(), "/api/v1/charts/migrationChart").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["type"], "line");
        assert_eq!(body["data"]["datasets"][1]["yAxisID"], "y1");
    }

    #[tokio::test]
    async fn test_unknown_chart_is_404() {
        let response = get(defaults_app(), "/api/v1/charts/pieChart").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_map() {
        let body = json_body(get(defaults_app(), "/api/v1/map").await).await;
        assert_eq!(body["markers"].as_array().map(Vec::len), Some(5));
        assert_eq!(body["zoom"], 6);
        assert_eq!(body["legend"]["position"], "bottomright");
    }

    #[tokio::test]
    async fn test_slots() {
        let body = json_body(get(defaults_app(), "/api/v1/slots").await).await;
        let writes = body["writes"].as_array().unwrap();
        assert_eq!(body["total"], writes.len());
        assert_eq!(writes[0]["slot"], "hero.population");
        assert_eq!(writes[0]["text"], "12,500");
    }

    #[test]
    fn test_cors_layer_accepts_empty_and_invalid_origins() {
        let _ = cors_layer(&[]);
        let _ = cors_layer(&["http://localhost:8080".to_string(), "bad\norigin".to_string()]);
    }
}
