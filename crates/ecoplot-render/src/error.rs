//! Error types for chart rendering.

/// Errors that can occur while rendering a chart.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A configured color is not a `#rgb` or `#rrggbb` hex value.
    #[error("population {name:?} has invalid color {color:?}")]
    InvalidColor {
        /// The population whose color was rejected.
        name: String,
        /// The normalized color token.
        color: String,
    },

    /// The drawing backend failed (font lookup, encoding, file write).
    #[error("failed to draw chart: {message}")]
    Drawing {
        /// Description of the backend failure.
        message: String,
    },
}

impl RenderError {
    pub(crate) fn drawing(err: impl std::fmt::Display) -> Self {
        Self::Drawing {
            message: err.to_string(),
        }
    }
}
