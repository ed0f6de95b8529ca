//! Render error types

use thiserror::Error;

use crate::project::WidgetId;

/// Errors reported by a rendering collaborator
#[derive(Error, Debug)]
pub enum RenderError {
    /// A chart could not be drawn
    #[error("Chart {widget} failed: {message}")]
    Chart { widget: WidgetId, message: String },

    /// The map could not be drawn
    #[error("Map failed: {0}")]
    Map(String),

    /// Bundle serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;
