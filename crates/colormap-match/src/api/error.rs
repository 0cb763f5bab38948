//! Unified error type for the colormap-match public API.

use thiserror::Error;

use crate::color::ColorError;

/// Unified error type for the colormap-match public API.
///
/// # Example
///
/// ```
/// use colormap_match::{MatchError, ReferenceLibrary};
///
/// fn lookup(library: &ReferenceLibrary) -> Result<usize, MatchError> {
///     Ok(library.get("jet")?.samples.len())
/// }
///
/// let library = ReferenceLibrary::from_colormaps(2, Vec::new()).unwrap();
/// assert!(matches!(lookup(&library), Err(MatchError::UnknownColormap { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// A colormap name with no reference gradient
    #[error("unknown colormap: {name}")]
    UnknownColormap { name: String },

    /// Pixel buffer length disagrees with the declared dimensions
    #[error("malformed image: expected {expected} bytes, got {actual}")]
    MalformedImage { expected: usize, actual: usize },

    /// Color space conversion error
    #[error("color conversion failed: {0}")]
    Color(#[from] ColorError),
}

impl MatchError {
    pub(crate) fn unknown(name: impl Into<String>) -> Self {
        MatchError::UnknownColormap { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(MatchError::unknown("foo").to_string(), "unknown colormap: foo");
        assert_eq!(
            MatchError::MalformedImage {
                expected: 12,
                actual: 10
            }
            .to_string(),
            "malformed image: expected 12 bytes, got 10"
        );
        let from: MatchError = ColorError::InvalidColorSpace { name: "HSL".into() }.into();
        assert_eq!(
            from.to_string(),
            "color conversion failed: invalid color space: HSL"
        );
    }
}
