//! Widget Projectors
//!
//! Pure functions from a slice of the [`ViewModel`](crate::model::ViewModel)
//! to one widget's configuration:
//!
//! - **charts**: The seven chart widgets ([`ChartConfig`])
//! - **map**: Peer map markers, popups and legend ([`MapConfig`])
//! - **text**: Hero, summary and sidebar display slots ([`SlotWrite`])
//! - **labels**: Short area labels and marker codes
//! - **palette**: Colors and sizes owned by the page design
//!
//! Projectors never see the source document and never fail. The same view
//! model always projects to the same configuration.

pub mod chart;
pub mod charts;
pub mod labels;
pub mod map;
pub mod palette;
pub mod text;

pub use chart::{AnimationDescriptor, ChartConfig, ChartKind, DataValues, Dataset, WidgetId};
pub use charts::project_chart;
pub use labels::{marker_code, short_label, AreaLabels};
pub use map::{escape_html, project_map, MapConfig, MapSettings, Marker};
pub use text::{
    apply_text, format_thousands, project_text, DisplaySlots, SlotId, SlotMap, SlotWrite,
    TextReport,
};
