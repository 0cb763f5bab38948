//! Reference colormaps
//!
//! A [`Catalog`] names the colormaps by category. [`ReferenceLibrary::build`]
//! samples each non-excluded gradient, converts the samples to CAM02-UCS and
//! indexes them for nearest-neighbor queries.

mod catalog;
mod data;
mod gradient;
mod library;

pub use catalog::{Catalog, Category};
pub use gradient::{hex_rgb, Gradient, Knot};
pub use library::{ReferenceColormap, ReferenceLibrary, DEFAULT_SAMPLES};

/// Gradient definition for a name in the default catalog.
///
/// Excluded grayscale maps have none.
pub fn gradient(name: &str) -> Option<Gradient> {
    data::gradient(name)
}
