//! # Community Dashboard
//!
//! Resolves a town's community statistics snapshot (health, talent and
//! competitiveness indicators) into ready-to-draw widget configurations:
//! seven charts, one peer map and the page's text slots.
//!
//! ## Features
//!
//! - **Total resolution**: every field falls back to a default on its own,
//!   so a missing or partial data document never breaks a widget
//! - **Pure projectors**: the same view model always yields the same
//!   chart, map and text configuration
//! - **Deferred drawing**: charts and counters draw once, on first view
//! - **HTTP API**: serves the resolved dashboard to a browser front-end
//!
//! ## Modules
//!
//! - [`source`]: Data document types and one-shot loading
//! - [`model`]: View model, defaults and the resolver
//! - [`project`]: Chart, map and text projectors
//! - [`render`]: Dashboard state, viewport trigger and static rendering
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use community_dashboard::model;
//! use community_dashboard::project::MapSettings;
//! use community_dashboard::render::{render_static, DashboardState};
//! use community_dashboard::source::{DocumentLoader, SourceLocation};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fetch once; failures fall back to defaults
//!     let loader = DocumentLoader::new(Duration::from_secs(10))?;
//!     let outcome = loader
//!         .load(&SourceLocation::parse("./data/dashboard-metrics.json"))
//!         .await;
//!
//!     // Resolve and project
//!     let vm = model::resolve(outcome.document.as_ref());
//!     let state = DashboardState::build(vm, outcome.origin, &MapSettings::default());
//!
//!     // Draw everything
//!     let bundle = render_static(Arc::new(state));
//!     println!("{}", bundle.to_json_pretty()?);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod model;
pub mod project;
pub mod render;
pub mod source;

// Re-export top-level types for convenience
pub use source::{DataOrigin, DocumentLoader, LoadError, SourceDocument, SourceLocation};

pub use model::{resolve, resolve_json, GeoArea, Pillar, ViewModel};

pub use project::{
    project_chart, project_map, project_text, ChartConfig, MapConfig, MapSettings, SlotWrite,
    WidgetId,
};

pub use render::{render_static, DashboardState, DrawTrigger, RenderBundle, RenderError, Renderer};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, ConfigNotice, LoadedConfig, LoggingConfig, SourceConfig,
};
