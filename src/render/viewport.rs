//! Viewport observation
//!
//! A [`ViewportObserver`] takes `(region, callback)` pairs and calls each
//! callback at most once, the first time its region becomes visible. It
//! knows nothing about what the callbacks draw.

use std::collections::BTreeMap;

use crate::project::text::HeroCounter;
use crate::project::WidgetId;

/// A watched area of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// A chart container
    Chart(WidgetId),
    /// A hero counter
    Counter(HeroCounter),
}

impl Region {
    /// Every deferred region of the page, charts first
    pub fn all() -> Vec<Region> {
        WidgetId::all()
            .iter()
            .map(|id| Region::Chart(*id))
            .chain(HeroCounter::all().iter().map(|c| Region::Counter(*c)))
            .collect()
    }
}

/// Callback run on first intersection
pub type EnterCallback = Box<dyn FnOnce(Region)>;

/// Source of viewport-entry events
pub trait ViewportObserver {
    /// Watch `region` and run `callback` once, on its first intersection
    fn observe(&mut self, region: Region, callback: EnterCallback);
}

/// Observer driven by explicit [`enter`](ManualViewport::enter) calls.
///
/// Used for static rendering, where every region counts as visible, and
/// in tests.
#[derive(Default)]
pub struct ManualViewport {
    pending: BTreeMap<Region, Vec<EnterCallback>>,
}

impl ManualViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that `region` entered the viewport. Returns how many
    /// callbacks ran; a region that already fired runs none.
    pub fn enter(&mut self, region: Region) -> usize {
        match self.pending.remove(&region) {
            Some(callbacks) => {
                let count = callbacks.len();
                for callback in callbacks {
                    callback(region);
                }
                count
            }
            None => 0,
        }
    }

    /// Enter every watched region in region order
    pub fn enter_all(&mut self) -> usize {
        let regions: Vec<Region> = self.pending.keys().copied().collect();
        regions.into_iter().map(|region| self.enter(region)).sum()
    }

    /// Number of regions still waiting for their first intersection
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl ViewportObserver for ManualViewport {
    fn observe(&mut self, region: Region, callback: EnterCallback) {
        self.pending.entry(region).or_default().push(callback);
    }
}
