//! Rainbow-scan - find pages that use rainbow colormaps
//!
//! Input expansion, image decoding, configuration and debug export around
//! the `colormap-match` core. This library exposes modules for the CLI and
//! for integration testing.

pub mod error;
pub mod models;
pub mod services;
