//! Static rendering
//!
//! Renders the whole dashboard at once into a JSON bundle: every region is
//! treated as visible, every counter runs to its end, and the result holds
//! exactly what a browser front-end would have drawn.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::RenderResult;
use super::state::DashboardState;
use super::trigger::{schedule, DrawTrigger, Renderer};
use super::viewport::ManualViewport;
use crate::project::text::SlotContent;
use crate::project::{apply_text, ChartConfig, MapConfig, SlotMap, TextReport, WidgetId};
use crate::source::DataOrigin;

/// Frame spacing of the simulated clock, 60 fps
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Renderer that keeps every drawn configuration
#[derive(Debug, Default)]
pub struct BundleRenderer {
    charts: BTreeMap<WidgetId, ChartConfig>,
    map: Option<MapConfig>,
}

impl Renderer for BundleRenderer {
    fn draw_chart(&mut self, id: WidgetId, config: &ChartConfig) -> RenderResult<()> {
        self.charts.insert(id, config.clone());
        Ok(())
    }

    fn draw_map(&mut self, config: &MapConfig) -> RenderResult<()> {
        self.map = Some(config.clone());
        Ok(())
    }
}

/// Everything drawn by one static render
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBundle {
    pub generated_at: DateTime<Utc>,
    pub origin: DataOrigin,
    pub charts: BTreeMap<WidgetId, ChartConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapConfig>,
    /// Final slot contents keyed by slot id
    pub slots: BTreeMap<String, SlotContent>,
    pub text_report: TextReport,
    /// Simulated time the counters needed to settle
    pub settle_ms: f64,
}

impl RenderBundle {
    pub fn to_json_pretty(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> RenderResult<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Render every widget of `state` against the standard page markup
pub fn render_static(state: Arc<DashboardState>) -> RenderBundle {
    let metrics_per_pillar = crate::model::Pillar::all()
        .iter()
        .map(|p| state.view_model().sidebar.get(*p).len())
        .max()
        .unwrap_or(0);
    let mut slots = SlotMap::standard(metrics_per_pillar);
    let text_report = apply_text(state.text(), &mut slots);

    let trigger = Rc::new(RefCell::new(DrawTrigger::new(
        Arc::clone(&state),
        BundleRenderer::default(),
    )));
    if let Err(e) = trigger.borrow_mut().draw_map() {
        warn!(error = %e, "Map draw failed, skipping");
    }

    let mut viewport = ManualViewport::new();
    schedule(&trigger, &mut viewport);
    viewport.enter_all();

    let mut now = 0.0;
    while trigger.borrow_mut().advance(now, &mut slots) > 0 {
        now += FRAME_INTERVAL_MS;
    }

    let renderer = trigger.borrow_mut().take_renderer();

    info!(
        charts = renderer.charts.len(),
        skipped_slots = text_report.skipped.len(),
        settle_ms = now,
        "Static render complete"
    );

    RenderBundle {
        generated_at: Utc::now(),
        origin: state.origin().clone(),
        charts: renderer.charts,
        map: renderer.map,
        slots: slots
            .iter()
            .map(|(id, content)| (id.to_string(), content.clone()))
            .collect(),
        text_report,
        settle_ms: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{defaults, resolve_json};
    use crate::project::MapSettings;
    use serde_json::json;

    fn state_for(vm: crate::model::ViewModel) -> Arc<DashboardState> {
        Arc::new(DashboardState::build(
            vm,
            DataOrigin::Defaults {
                reason: "test".to_string(),
            },
            &MapSettings::default(),
        ))
    }

    #[test]
    fn test_static_render_draws_everything() {
        let bundle = render_static(state_for(defaults::view_model()));

        assert_eq!(bundle.charts.len(), WidgetId::all().len());
        assert!(bundle.charts.values().all(|c| c.options.animation.is_some()));
        assert_eq!(bundle.map.as_ref().map(|m| m.markers.len()), Some(5));
        assert!(bundle.text_report.skipped.is_empty());
        assert!(bundle.settle_ms >= 2000.0);
    }

    #[test]
    fn test_counters_settle_on_exact_values() {
        let vm = resolve_json(Some(&json!({ "heroStats": { "population": 12500 } })));
        let bundle = render_static(state_for(vm));

        assert_eq!(bundle.slots["hero.population"].text, "12,500");
        assert_eq!(bundle.slots["hero.pillars"].text, "3");
        assert_eq!(bundle.slots["hero.metrics"].text, "24");
    }

    #[test]
    fn test_bundle_json_shape() {
        let bundle = render_static(state_for(defaults::view_model()));
        let json: serde_json::Value =
            serde_json::from_str(&bundle.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["origin"]["kind"], "defaults");
        assert_eq!(json["charts"]["migrationChart"]["type"], "line");
        assert_eq!(json["slots"]["summary.health"]["text"], "72");
        assert!(json["generatedAt"].is_string());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        render_static(state_for(defaults::view_model()))
            .write_to(&path)
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("peerComparisonChart"));
    }
}
