//! Render Runtime
//!
//! Drives the projected configurations into the rendering collaborators:
//!
//! - **state**: [`DashboardState`], built once after resolution
//! - **viewport**: Region observation with at-most-once callbacks
//! - **trigger**: Deferred, at-most-once chart and counter drawing
//! - **counter**: Ease-out count-up animation of hero counters
//! - **bundle**: Static render of every widget into one JSON bundle
//! - **error**: Error types
//!
//! ```text
//! DashboardState ──▶ DrawTrigger ──draw_chart──▶ Renderer
//!                        ▲    └──counter frames──▶ DisplaySlots
//!        ViewportObserver┘ (first entry of each region)
//! ```

pub mod bundle;
pub mod counter;
pub mod error;
pub mod state;
pub mod trigger;
pub mod viewport;

pub use bundle::{render_static, BundleRenderer, RenderBundle};
pub use counter::{ease_out_cubic, parse_counter_text, CounterAnimation, CounterFrame};
pub use error::{RenderError, RenderResult};
pub use state::DashboardState;
pub use trigger::{schedule, DrawTrigger, Renderer};
pub use viewport::{EnterCallback, ManualViewport, Region, ViewportObserver};
