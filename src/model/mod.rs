//! Dashboard Data Model
//!
//! - **view_model**: The fully resolved data every widget reads
//! - **defaults**: The static default for every field
//! - **resolve**: Field-granular merge of a document over the defaults
//!
//! ```text
//! SourceDocument (optional, partial) ──resolve──▶ ViewModel (total)
//!                      defaults ───────────┘
//! ```

pub mod defaults;
pub mod resolve;
pub mod view_model;

pub use resolve::{resolve, resolve_json};
pub use view_model::{
    ChangeDirection, ChartSeries, ComparisonSeries, Coordinates, DualSeries, GeoArea, HeroStats,
    LabeledSeries, Pillar, PillarScores, SidebarMetric, SidebarMetrics, SummaryScores, ViewModel,
};
