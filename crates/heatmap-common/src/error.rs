//! Error types for heatmap generation.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap operations.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Geometry Errors ===
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    // === Argument Errors ===
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    // === Output Errors ===
    #[error("Encoding failed: {0}")]
    Encode(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HeatmapError {
    /// Create an InvalidDimension error.
    pub fn invalid_dimension(width: usize, height: usize) -> Self {
        Self::InvalidDimension { width, height }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            HeatmapError::InvalidDimension { .. }
                | HeatmapError::BufferSize { .. }
                | HeatmapError::InvalidArgument(_)
                | HeatmapError::UnknownPalette(_)
        )
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::Config(format!("JSON error: {}", err))
    }
}

/// Reject zero-sized geometry.
pub fn check_dimensions(width: usize, height: usize) -> HeatmapResult<()> {
    if width == 0 || height == 0 {
        return Err(HeatmapError::invalid_dimension(width, height));
    }
    Ok(())
}
