//! Page image fixtures written to temporary directories.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use rainbow_scan::models::DetectConfig;
use tempfile::TempDir;

/// Sample count that lets a 2x2 page cover a whole gradient
pub const SMALL_SAMPLES: usize = 4;

/// Detection config with a reference library of [`SMALL_SAMPLES`] points
pub fn small_config() -> DetectConfig {
    DetectConfig {
        samples: SMALL_SAMPLES,
        ..DetectConfig::default()
    }
}

/// `n` evenly spaced colors of a named reference gradient, 8-bit
pub fn gradient_colors(name: &str, n: usize) -> Vec<[u8; 3]> {
    colormap_match::reference::gradient(name)
        .unwrap_or_else(|| panic!("no gradient named {name}"))
        .sample(n)
        .into_iter()
        .map(|rgb| rgb.map(|c| (c * 255.0).round() as u8))
        .collect()
}

/// A 2x2 page holding four samples of a gradient
pub fn gradient_image(name: &str) -> RgbImage {
    let colors = gradient_colors(name, 4);
    RgbImage::from_fn(2, 2, |x, y| Rgb(colors[(y * 2 + x) as usize]))
}

/// A 256x8 color bar of a gradient
pub fn color_bar_image(name: &str) -> RgbImage {
    let colors = gradient_colors(name, 256);
    RgbImage::from_fn(256, 8, |x, _| Rgb(colors[x as usize]))
}

pub fn blank_image() -> RgbImage {
    RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]))
}

/// RGBA copy of an RGB image with every pixel at the given alpha
pub fn with_alpha(image: &RgbImage, alpha: u8) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgb([r, g, b]) = *image.get_pixel(x, y);
        Rgba([r, g, b, alpha])
    })
}

/// PNG-encoded bytes of an image
pub fn png_bytes(image: DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// Scratch directory of page files
pub struct PageDir {
    pub dir: TempDir,
}

impl PageDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file in the directory as an input string
    pub fn input(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    pub fn write_rgb(&self, name: &str, image: &RgbImage) -> PathBuf {
        let path = self.dir.path().join(name);
        image.save(&path).expect("write page image");
        path
    }

    pub fn write_rgba(&self, name: &str, image: &RgbaImage) -> PathBuf {
        let path = self.dir.path().join(name);
        image.save(&path).expect("write page image");
        path
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).expect("write file");
        path
    }
}
