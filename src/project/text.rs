//! Text Projector
//!
//! Hero counters, summary scores and sidebar metric triples are written
//! into named display slots. The markup decides which slots exist; a slot
//! it leaves out is skipped without failing the rest.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::model::{Pillar, ViewModel};
use crate::source::format_score;

/// Hero banner counters, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeroCounter {
    Population,
    Pillars,
    Metrics,
}

impl HeroCounter {
    pub fn all() -> &'static [HeroCounter] {
        &[HeroCounter::Population, HeroCounter::Pillars, HeroCounter::Metrics]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeroCounter::Population => "population",
            HeroCounter::Pillars => "pillars",
            HeroCounter::Metrics => "metrics",
        }
    }
}

/// Part of a sidebar metric item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricPart {
    Value,
    Label,
    Change,
}

impl MetricPart {
    pub fn all() -> &'static [MetricPart] {
        &[MetricPart::Value, MetricPart::Label, MetricPart::Change]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricPart::Value => "value",
            MetricPart::Label => "label",
            MetricPart::Change => "change",
        }
    }
}

/// Address of one display slot in the page markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotId {
    Hero(HeroCounter),
    Summary(Pillar),
    Metric {
        pillar: Pillar,
        index: usize,
        part: MetricPart,
    },
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Hero(counter) => write!(f, "hero.{}", counter.as_str()),
            SlotId::Summary(pillar) => write!(f, "summary.{}", pillar),
            SlotId::Metric {
                pillar,
                index,
                part,
            } => write!(f, "sidebar.{}.{}.{}", pillar, index, part.as_str()),
        }
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One write into a display slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlotWrite {
    Text { slot: SlotId, text: String },
    Class { slot: SlotId, class: String },
}

impl SlotWrite {
    pub fn slot(&self) -> &SlotId {
        match self {
            SlotWrite::Text { slot, .. } | SlotWrite::Class { slot, .. } => slot,
        }
    }
}

/// Page markup the text projector writes into.
///
/// Both setters return `false` when the slot does not exist.
pub trait DisplaySlots {
    fn set_text(&mut self, slot: &SlotId, text: &str) -> bool;
    fn set_class(&mut self, slot: &SlotId, class: &str) -> bool;
}

/// Outcome of applying slot writes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextReport {
    pub applied: usize,
    /// Writes whose slot was absent from the markup
    pub skipped: Vec<SlotId>,
}

/// Build every slot write for a view model
pub fn project_text(vm: &ViewModel) -> Vec<SlotWrite> {
    let mut writes = Vec::new();

    let hero = &vm.hero;
    for counter in HeroCounter::all() {
        let value = match counter {
            HeroCounter::Population => hero.population,
            HeroCounter::Pillars => u64::from(hero.pillars),
            HeroCounter::Metrics => u64::from(hero.metrics),
        };
        writes.push(SlotWrite::Text {
            slot: SlotId::Hero(*counter),
            text: format_thousands(value),
        });
    }

    for pillar in Pillar::all() {
        writes.push(SlotWrite::Text {
            slot: SlotId::Summary(*pillar),
            text: format_score(vm.summary.get(*pillar)),
        });
    }

    for pillar in Pillar::all() {
        for (index, metric) in vm.sidebar.get(*pillar).iter().enumerate() {
            let slot = |part| SlotId::Metric {
                pillar: *pillar,
                index,
                part,
            };
            writes.push(SlotWrite::Text {
                slot: slot(MetricPart::Value),
                text: metric.value.clone(),
            });
            writes.push(SlotWrite::Text {
                slot: slot(MetricPart::Label),
                text: metric.label.clone(),
            });
            writes.push(SlotWrite::Text {
                slot: slot(MetricPart::Change),
                text: metric.change.clone(),
            });
            writes.push(SlotWrite::Class {
                slot: slot(MetricPart::Change),
                class: format!("metric-change {}", metric.direction.as_str()),
            });
        }
    }

    writes
}

/// Apply writes to the markup, skipping absent slots
pub fn apply_text(writes: &[SlotWrite], slots: &mut dyn DisplaySlots) -> TextReport {
    let mut report = TextReport::default();

    for write in writes {
        let written = match write {
            SlotWrite::Text { slot, text } => slots.set_text(slot, text),
            SlotWrite::Class { slot, class } => slots.set_class(slot, class),
        };
        if written {
            report.applied += 1;
        } else {
            debug!(slot = %write.slot(), "Display slot missing, write skipped");
            report.skipped.push(*write.slot());
        }
    }

    report
}

/// Integer with `,` thousands separators (`12500` -> `"12,500"`)
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Contents of one slot in a [`SlotMap`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotContent {
    pub text: String,
    pub class: Option<String>,
}

/// In-memory markup
#[derive(Debug, Clone, Default)]
pub struct SlotMap {
    slots: HashMap<SlotId, SlotContent>,
}

impl SlotMap {
    /// Markup with exactly the given slots, all empty
    pub fn with_slots(ids: impl IntoIterator<Item = SlotId>) -> Self {
        Self {
            slots: ids
                .into_iter()
                .map(|id| (id, SlotContent::default()))
                .collect(),
        }
    }

    /// The standard page: three hero counters, three summary cards and
    /// `metrics_per_pillar` sidebar items per pillar
    pub fn standard(metrics_per_pillar: usize) -> Self {
        let hero = HeroCounter::all().iter().map(|c| SlotId::Hero(*c));
        let summary = Pillar::all().iter().map(|p| SlotId::Summary(*p));
        let sidebar = Pillar::all().iter().flat_map(move |pillar| {
            (0..metrics_per_pillar).flat_map(move |index| {
                MetricPart::all().iter().map(move |part| SlotId::Metric {
                    pillar: *pillar,
                    index,
                    part: *part,
                })
            })
        });
        Self::with_slots(hero.chain(summary).chain(sidebar))
    }

    pub fn remove(&mut self, slot: &SlotId) -> Option<SlotContent> {
        self.slots.remove(slot)
    }

    pub fn get(&self, slot: &SlotId) -> Option<&SlotContent> {
        self.slots.get(slot)
    }

    pub fn text(&self, slot: &SlotId) -> Option<&str> {
        self.slots.get(slot).map(|content| content.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotId, &SlotContent)> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl DisplaySlots for SlotMap {
    fn set_text(&mut self, slot: &SlotId, text: &str) -> bool {
        match self.slots.get_mut(slot) {
            Some(content) => {
                content.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn set_class(&mut self, slot: &SlotId, class: &str) -> bool {
        match self.slots.get_mut(slot) {
            Some(content) => {
                content.class = Some(class.to_string());
                true
            }
            None => false,
        }
    }
}
