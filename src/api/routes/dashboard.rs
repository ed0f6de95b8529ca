//! Dashboard Routes
//!
//! Read-only endpoints serving the resolved dashboard to a front-end.
//!
//! - GET /api/v1/dashboard - Resolved view model
//! - GET /api/v1/charts - Every chart configuration
//! - GET /api/v1/charts/:id - One chart configuration
//! - GET /api/v1/map - Map configuration
//! - GET /api/v1/slots - Text slot writes

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartListResponse, DashboardResponse, SlotsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::project::{AnimationDescriptor, ChartConfig, MapConfig, WidgetId};

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let dashboard = &state.dashboard;
    Json(DashboardResponse {
        origin: dashboard.origin().clone(),
        built_at: dashboard.built_at(),
        view_model: dashboard.view_model().clone(),
    })
}

/// GET /api/v1/charts
///
/// Configurations come with the entrance animation attached; the browser
/// draws each one when its container scrolls into view.
pub async fn list_charts(State(state): State<Arc<AppState>>) -> Json<ChartListResponse> {
    let charts = state
        .dashboard
        .charts()
        .iter()
        .map(|(id, config)| (*id, animated(config)))
        .collect::<std::collections::BTreeMap<_, _>>();

    Json(ChartListResponse {
        total: charts.len(),
        charts,
    })
}

/// GET /api/v1/charts/:id
///
/// `id` is the container id, e.g. `migrationChart`.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ChartConfig>> {
    let widget: WidgetId = id.parse().map_err(ApiError::NotFound)?;

    let config = state
        .dashboard
        .chart(widget)
        .ok_or_else(|| ApiError::NotFound(format!("Chart {} has no configuration", widget)))?;

    Ok(Json(animated(config)))
}

/// GET /api/v1/map
pub async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapConfig> {
    Json(state.dashboard.map().clone())
}

/// GET /api/v1/slots
pub async fn get_slots(State(state): State<Arc<AppState>>) -> Json<SlotsResponse> {
    let writes = state.dashboard.text().to_vec();
    Json(SlotsResponse {
        total: writes.len(),
        writes,
    })
}

fn animated(config: &ChartConfig) -> ChartConfig {
    config.clone().with_animation(AnimationDescriptor::default())
}
