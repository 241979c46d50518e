//! # Widget Error Types
//!
//! Everything that can go wrong while building or driving a widget.

use thiserror::Error;

/// Errors reported by widgets.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum WidgetError {
    /// Slider configured with an empty value range.
    #[error("degenerate slider range: min {min} equals max {max}")]
    Degenerate {
        /// Lower end of the range.
        min: f64,
        /// Upper end of the range.
        max: f64,
    },

    /// Widget constructed with non-positive bounds.
    #[error("invalid widget bounds: {width}x{height}")]
    InvalidBounds {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
}

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
