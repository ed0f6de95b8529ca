//! Data Source
//!
//! Loading of the external dashboard data document:
//!
//! - **document**: Wire types, every field optional
//! - **loader**: One-shot fetch from a file or URL with silent degradation
//! - **error**: Error types

pub mod document;
pub mod error;
pub mod loader;

pub use document::{format_score, DisplayValue, GeoAreaDoc, ParsedDocument, SourceDocument};
pub use error::{LoadError, LoadResult};
pub use loader::{DataOrigin, DocumentLoader, LoadOutcome, SourceLocation};
