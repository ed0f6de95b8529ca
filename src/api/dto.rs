//! Data Transfer Objects
//!
//! Response types for the API endpoints, serialized to JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::ViewModel;
use crate::project::{ChartConfig, SlotWrite, WidgetId};
use crate::source::DataOrigin;

/// Resolved dashboard data
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Where the data came from
    pub origin: DataOrigin,
    /// When the dashboard was resolved
    pub built_at: DateTime<Utc>,
    pub view_model: ViewModel,
}

/// Every chart configuration
#[derive(Debug, Serialize)]
pub struct ChartListResponse {
    pub total: usize,
    pub charts: BTreeMap<WidgetId, ChartConfig>,
}

/// Text slot writes
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub total: usize,
    pub writes: Vec<SlotWrite>,
}

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` when the document loaded, `degraded` on defaults
    pub status: String,
    pub data_origin: DataOrigin,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
