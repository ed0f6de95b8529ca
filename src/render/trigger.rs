//! Deferred drawing
//!
//! Charts and hero counters are drawn when their region first becomes
//! visible. [`DrawTrigger`] keeps an "already animated" flag per region so
//! that a repeated entry never draws twice, whatever the observer does.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, warn};

use super::counter::CounterAnimation;
use super::error::RenderResult;
use super::state::DashboardState;
use super::viewport::{Region, ViewportObserver};
use crate::project::text::HeroCounter;
use crate::project::{AnimationDescriptor, ChartConfig, DisplaySlots, MapConfig, SlotId, WidgetId};

/// The chart and map libraries
pub trait Renderer {
    fn draw_chart(&mut self, id: WidgetId, config: &ChartConfig) -> RenderResult<()>;
    fn draw_map(&mut self, config: &MapConfig) -> RenderResult<()>;
}

/// At-most-once draw of each deferred region
pub struct DrawTrigger<R: Renderer> {
    state: Arc<DashboardState>,
    renderer: R,
    animation: AnimationDescriptor,
    animated: HashSet<Region>,
    counters: Vec<(HeroCounter, CounterAnimation)>,
}

impl<R: Renderer> DrawTrigger<R> {
    pub fn new(state: Arc<DashboardState>, renderer: R) -> Self {
        Self {
            state,
            renderer,
            animation: AnimationDescriptor::default(),
            animated: HashSet::new(),
            counters: Vec::new(),
        }
    }

    pub fn with_animation(mut self, animation: AnimationDescriptor) -> Self {
        self.animation = animation;
        self
    }

    /// Handle a viewport entry. Returns `true` only for the first entry of
    /// a region.
    ///
    /// A chart is drawn with the entrance animation attached; a counter
    /// starts counting towards the number currently in its slot. A failed
    /// draw still marks the region as animated.
    pub fn on_enter(&mut self, region: Region) -> bool {
        if !self.animated.insert(region) {
            debug!(?region, "Region already animated");
            return false;
        }

        match region {
            Region::Chart(id) => self.draw_chart(id),
            Region::Counter(counter) => self.start_counter(counter),
        }
        true
    }

    fn draw_chart(&mut self, id: WidgetId) {
        let Some(config) = self.state.chart(id) else {
            warn!(widget = %id, "No configuration for chart");
            return;
        };
        let config = config.clone().with_animation(self.animation.clone());

        match self.renderer.draw_chart(id, &config) {
            Ok(()) => debug!(widget = %id, "Chart drawn"),
            Err(e) => warn!(widget = %id, error = %e, "Chart draw failed, skipping"),
        }
    }

    fn start_counter(&mut self, counter: HeroCounter) {
        let slot = SlotId::Hero(counter);
        match self.state.slot_text(&slot).and_then(CounterAnimation::from_text) {
            Some(animation) => {
                debug!(slot = %slot, target = animation.target(), "Counter started");
                self.counters.push((counter, animation));
            }
            None => warn!(slot = %slot, "Counter text is not a number, not animating"),
        }
    }

    /// Draw the map. It is not deferred.
    pub fn draw_map(&mut self) -> RenderResult<()> {
        self.renderer.draw_map(self.state.map())
    }

    /// Advance every running counter to `now_ms` and write its text.
    /// Returns how many counters are still running.
    pub fn advance(&mut self, now_ms: f64, slots: &mut dyn DisplaySlots) -> usize {
        for (counter, animation) in self.counters.iter_mut() {
            let frame = animation.tick(now_ms);
            slots.set_text(&SlotId::Hero(*counter), &frame.text);
        }
        self.counters.retain(|(_, animation)| !animation.is_finished());
        self.counters.len()
    }

    pub fn is_animated(&self, region: Region) -> bool {
        self.animated.contains(&region)
    }

    pub fn running_counters(&self) -> usize {
        self.counters.len()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Hand back the renderer, leaving a fresh one in its place
    pub fn take_renderer(&mut self) -> R
    where
        R: Default,
    {
        std::mem::take(&mut self.renderer)
    }
}

/// Register every deferred region of the page with `observer`
pub fn schedule<R: Renderer + 'static>(
    trigger: &Rc<RefCell<DrawTrigger<R>>>,
    observer: &mut dyn ViewportObserver,
) {
    for region in Region::all() {
        let trigger = Rc::clone(trigger);
        observer.observe(
            region,
            Box::new(move |region| {
                trigger.borrow_mut().on_enter(region);
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::defaults;
    use crate::project::{MapSettings, SlotMap};
    use crate::render::error::RenderError;
    use crate::render::viewport::ManualViewport;
    use crate::source::DataOrigin;

    #[derive(Default)]
    struct CountingRenderer {
        charts: Vec<WidgetId>,
        maps: usize,
        fail_on: Option<WidgetId>,
    }

    impl Renderer for CountingRenderer {
        fn draw_chart(&mut self, id: WidgetId, config: &ChartConfig) -> RenderResult<()> {
            assert!(config.options.animation.is_some());
            if self.fail_on == Some(id) {
                return Err(RenderError::Chart {
                    widget: id,
                    message: "canvas missing".to_string(),
                });
            }
            self.charts.push(id);
            Ok(())
        }

        fn draw_map(&mut self, _config: &MapConfig) -> RenderResult<()> {
            self.maps += 1;
            Ok(())
        }
    }

    fn state() -> Arc<DashboardState> {
        Arc::new(DashboardState::build(
            defaults::view_model(),
            DataOrigin::Defaults {
                reason: "test".to_string(),
            },
            &MapSettings::default(),
        ))
    }

    #[test]
    fn test_two_entries_draw_once() {
        let mut trigger = DrawTrigger::new(state(), CountingRenderer::default());
        let region = Region::Chart(WidgetId::Education);

        assert!(trigger.on_enter(region));
        assert!(!trigger.on_enter(region));
        assert_eq!(trigger.renderer().charts, vec![WidgetId::Education]);
        assert!(trigger.is_animated(region));
    }

    #[test]
    fn test_schedule_with_manual_viewport() {
        let trigger = Rc::new(RefCell::new(DrawTrigger::new(
            state(),
            CountingRenderer::default(),
        )));
        let mut viewport = ManualViewport::new();
        schedule(&trigger, &mut viewport);

        viewport.enter(Region::Chart(WidgetId::DentalAccess));
        viewport.enter(Region::Chart(WidgetId::DentalAccess));
        assert_eq!(trigger.borrow().renderer().charts.len(), 1);

        viewport.enter_all();
        viewport.enter_all();
        assert_eq!(trigger.borrow().renderer().charts.len(), WidgetId::all().len());
        assert_eq!(trigger.borrow().running_counters(), 3);
    }

    #[test]
    fn test_failed_draw_does_not_stop_others() {
        let renderer = CountingRenderer {
            fail_on: Some(WidgetId::Graduation),
            ..Default::default()
        };
        let mut trigger = DrawTrigger::new(state(), renderer);
        for id in WidgetId::all() {
            trigger.on_enter(Region::Chart(*id));
        }

        assert_eq!(trigger.renderer().charts.len(), WidgetId::all().len() - 1);
        assert!(!trigger.renderer().charts.contains(&WidgetId::Graduation));
        assert!(trigger.is_animated(Region::Chart(WidgetId::Graduation)));
    }

    #[test]
    fn test_counter_runs_to_slot_text() {
        let mut trigger = DrawTrigger::new(state(), CountingRenderer::default());
        let mut slots = SlotMap::standard(3);
        let region = Region::Counter(HeroCounter::Population);
        assert!(trigger.on_enter(region));
        assert!(!trigger.on_enter(region));
        assert_eq!(trigger.running_counters(), 1);

        let mut now = 0.0;
        while trigger.advance(now, &mut slots) > 0 {
            now += 33.0;
        }
        assert_eq!(slots.text(&SlotId::Hero(HeroCounter::Population)), Some("25,416"));
    }

    #[test]
    fn test_map_is_drawn_directly() {
        let mut trigger = DrawTrigger::new(state(), CountingRenderer::default());
        trigger.draw_map().expect("map");
        assert_eq!(trigger.take_renderer().maps, 1);
        assert_eq!(trigger.renderer().maps, 0);
    }
}
