//! Color types and conversion into the perceptual matching space
//!
//! Page colors arrive as 8-bit sRGB and reference gradients as sRGB in
//! 0.0..=1.0. Both are converted to CAM02-UCS, where Euclidean distance
//! approximates perceived color difference.
//!
//! # Example
//!
//! ```
//! use colormap_match::{convert, ColorSpace};
//!
//! let jab = convert(&[[255.0, 255.0, 255.0]], ColorSpace::Srgb255, ColorSpace::Cam02Ucs).unwrap();
//! assert!((jab[0].j - 100.0).abs() < 0.1);
//! ```

mod cam02;
mod error;
mod jab;
mod space;
mod srgb;

pub use cam02::{Cam02, Surround, ViewingConditions};
pub use error::ColorError;
pub use jab::Jab;
pub use space::{convert, convert_named, ColorSpace};
pub use srgb::{srgb1_to_xyz100, srgb_to_linear};
