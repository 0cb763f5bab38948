//! Public API for the colormap-match crate.
//!
//! This module provides the high-level API: [`RainbowDetector`] builder and
//! [`MatchError`] unified error type.

mod detector;
mod error;

pub use detector::RainbowDetector;
pub use error::MatchError;
