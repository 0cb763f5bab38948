#![allow(clippy::excessive_precision)]

//! colormap-match: find rainbow colormaps on rendered pages
//!
//! The crate reduces page images to their distinct colors, compares those
//! colors with a library of reference colormaps in a perceptually uniform
//! color space, and flags pages that cover most of a rainbow-style gradient.
//! It performs no I/O: callers decode images and hand over pixel buffers.
//!
//! # Quick Start
//!
//! The [`RainbowDetector`] builder is the primary entry point:
//!
//! ```
//! use colormap_match::{Catalog, PageImage, RainbowDetector, ReferenceLibrary};
//!
//! let catalog = Catalog::matplotlib();
//! let library = ReferenceLibrary::build(&catalog, 256).unwrap();
//! let detector = RainbowDetector::new(&library, &catalog);
//!
//! let page = PageImage::from_rgb(1, 1, vec![30, 60, 90]).unwrap();
//! let result = detector.detect_images(&[("doc-1".to_string(), page)]).unwrap();
//! assert!(result.flagged.is_empty());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PageImage
//!     |
//!     v
//! extract_colors()        drop white and black, count distinct RGB
//!     |
//!     v
//! ColorTable              (R, G, B, count) per page
//!     |
//!     v
//! convert_tables()        sRGB -> XYZ -> CIECAM02 -> CAM02-UCS, batched
//!     |
//!     v
//! PerceptualTable
//!     |
//!     v
//! ColormapMatcher         nearest reference sample per page color,
//!     |                   distance < max_diff counts as a match
//!     v
//! MatchStatistic          pct_cm, pct_page per (page, colormap)
//!     |
//!     v
//! RainbowClassifier       rainbow family with pct_cm > cm_thresh
//!     |
//!     v
//! Classification          flagged pages + full statistics
//! ```
//!
//! # Coverage Ratios
//!
//! For a page and a colormap sampled at N positions:
//!
//! - `pct_cm` is the number of distinct reference samples that are the
//!   nearest neighbor of at least one matching page color, divided by N.
//!   A page that draws a full color bar scores close to 1.
//! - `pct_page` is the share of the page's distinct colors that match.
//!   It is not weighted by pixel count.
//!
//! Only `pct_cm` drives classification. A page with a handful of colors that
//! happen to lie on a rainbow gradient does not reach the threshold, while a
//! plotted rainbow scale or a heat map rendered with one does.
//!
//! # Color Space
//!
//! Matching uses CAM02-UCS with the usual sRGB viewing conditions (D65
//! white, 20% background, 64/pi/5 cd/m^2 adapting luminance, average
//! surround). A distance of 1.0 is close to one just-noticeable difference,
//! which is the default `max_diff`.

pub mod api;
pub mod classify;
pub mod color;
pub mod extract;
pub mod index;
pub mod matcher;
pub mod reference;
pub mod table;


pub use api::{MatchError, RainbowDetector};
pub use classify::{
    parse_page_number, Classification, FlaggedPage, RainbowClassifier, DEFAULT_CM_THRESH,
};
pub use color::{convert, convert_named, ColorError, ColorSpace, Jab};
pub use extract::{extract_colors, PageImage};
pub use index::{NearestIndex, Neighbor};
pub use matcher::{ColormapMatcher, MatchStatistic, DEFAULT_MAX_DIFF};
pub use reference::{
    Catalog, Category, Gradient, ReferenceColormap, ReferenceLibrary, DEFAULT_SAMPLES,
};
pub use table::{
    convert_tables, ColorSample, ColorTable, PerceptualSample, PerceptualTable,
};
