//! Error type for color space conversion

use thiserror::Error;

/// Error returned by color space parsing and conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// The named color space is not supported, or not supported in this
    /// direction (only conversions into CAM02-UCS are implemented).
    #[error("invalid color space: {name}")]
    InvalidColorSpace {
        /// The offending color space name
        name: String,
    },
}

impl ColorError {
    pub(crate) fn invalid(name: impl Into<String>) -> Self {
        ColorError::InvalidColorSpace { name: name.into() }
    }
}
