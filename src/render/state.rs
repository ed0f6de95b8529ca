//! Dashboard state
//!
//! Everything the page needs after resolution, built once at startup and
//! read-only afterwards. Shared between the draw trigger and the HTTP
//! handlers.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::info;

use crate::model::ViewModel;
use crate::project::{
    project_chart, project_map, project_text, ChartConfig, MapConfig, MapSettings, SlotWrite,
    WidgetId,
};
use crate::source::DataOrigin;

/// Resolved view model plus every projected widget configuration
#[derive(Debug, Clone)]
pub struct DashboardState {
    view_model: ViewModel,
    origin: DataOrigin,
    charts: BTreeMap<WidgetId, ChartConfig>,
    map: MapConfig,
    text: Vec<SlotWrite>,
    built_at: DateTime<Utc>,
}

impl DashboardState {
    /// Run every projector over `view_model`
    pub fn build(view_model: ViewModel, origin: DataOrigin, map_settings: &MapSettings) -> Self {
        let charts: BTreeMap<WidgetId, ChartConfig> = WidgetId::all()
            .iter()
            .map(|id| (*id, project_chart(*id, &view_model)))
            .collect();
        let map = project_map(&view_model, map_settings);
        let text = project_text(&view_model);

        info!(
            charts = charts.len(),
            markers = map.markers.len(),
            slot_writes = text.len(),
            loaded = origin.is_loaded(),
            "Dashboard state built"
        );

        Self {
            view_model,
            origin,
            charts,
            map,
            text,
            built_at: Utc::now(),
        }
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn origin(&self) -> &DataOrigin {
        &self.origin
    }

    pub fn charts(&self) -> &BTreeMap<WidgetId, ChartConfig> {
        &self.charts
    }

    pub fn chart(&self, id: WidgetId) -> Option<&ChartConfig> {
        self.charts.get(&id)
    }

    pub fn map(&self) -> &MapConfig {
        &self.map
    }

    pub fn text(&self) -> &[SlotWrite] {
        &self.text
    }

    /// Text of the write into `slot`, if any
    pub fn slot_text(&self, slot: &crate::project::SlotId) -> Option<&str> {
        self.text.iter().find_map(|write| match write {
            SlotWrite::Text { slot: s, text } if s == slot => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::defaults;
    use crate::project::text::HeroCounter;
    use crate::project::SlotId;

    fn default_state() -> DashboardState {
        DashboardState::build(
            defaults::view_model(),
            DataOrigin::Defaults {
                reason: "test".to_string(),
            },
            &MapSettings::default(),
        )
    }

    #[test]
    fn test_every_widget_has_a_config() {
        let state = default_state();
        assert_eq!(state.charts().len(), WidgetId::all().len());
        for id in WidgetId::all() {
            assert!(state.chart(*id).is_some(), "{}", id);
        }
        assert_eq!(state.map().markers.len(), 5);
        assert!(!state.origin().is_loaded());
    }

    #[test]
    fn test_slot_text_lookup() {
        let state = default_state();
        assert_eq!(
            state.slot_text(&SlotId::Hero(HeroCounter::Population)),
            Some("25,416")
        );
    }

    #[test]
    fn test_chart_configs_match_direct_projection() {
        let state = default_state();
        let vm = state.view_model();
        assert_eq!(
            state.chart(WidgetId::PeerComparison),
            Some(&project_chart(WidgetId::PeerComparison, vm))
        );
    }
}
