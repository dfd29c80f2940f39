//! Error types for diagram and configuration operations.

use crate::shapes::ElementId;
use thiserror::Error;

/// Errors raised by [`Diagram`](crate::canvas::Diagram) operations.
///
/// None of these are fatal. The editor session turns every one of them
/// into a no-op so the host never sees a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Element is not a group: {0}")]
    NotAGroup(ElementId),
    #[error("Element is not on the canvas root frame: {0}")]
    NotAtCanvasRoot(ElementId),
    #[error("Grouping needs at least 2 candidates, got {count}")]
    NotEnoughCandidates { count: usize },
    #[error("No active element")]
    NoActiveElement,
}

/// Result type for diagram operations.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Minimum size must be non-negative, got {width}x{height}")]
    InvalidMinimumSize { width: f64, height: f64 },
    #[error("Handle size must be positive, got {0}")]
    InvalidHandleSize(f64),
}
