//! sRGB decoding
//!
//! Converts gamma-encoded sRGB (IEC 61966-2-1) to CIE XYZ scaled so that
//! the D65 white has Y = 100, which is the input scale CIECAM02 expects.

/// Linear sRGB -> XYZ (D65) matrix with the 4-digit coefficients of the
/// IEC 61966-2-1 standard.
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

/// Decode one gamma-encoded sRGB channel (0.0..=1.0) to linear light.
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB triple with channels in 0.0..=1.0 to XYZ (Y of white = 100).
pub fn srgb1_to_xyz100(rgb: [f64; 3]) -> [f64; 3] {
    let lin = rgb.map(srgb_to_linear);
    let mut xyz = [0.0; 3];
    for (out, row) in xyz.iter_mut().zip(SRGB_TO_XYZ.iter()) {
        *out = 100.0 * (row[0] * lin[0] + row[1] * lin[1] + row[2] * lin[2]);
    }
    xyz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-12);
        // Exact: ((0.5 + 0.055) / 1.055)^2.4 = 0.214041...
        assert!((srgb_to_linear(0.5) - 0.214041).abs() < 1e-5);
    }

    #[test]
    fn test_transfer_linear_segment() {
        let c = 0.02;
        assert!((srgb_to_linear(c) - c / 12.92).abs() < 1e-15);
    }

    #[test]
    fn test_white_maps_to_d65() {
        let xyz = srgb1_to_xyz100([1.0, 1.0, 1.0]);
        assert!((xyz[0] - 95.05).abs() < 0.01, "X = {}", xyz[0]);
        assert!((xyz[1] - 100.0).abs() < 1e-9, "Y = {}", xyz[1]);
        assert!((xyz[2] - 108.9).abs() < 0.01, "Z = {}", xyz[2]);
    }

    /// The 4-digit standard matrix must stay close to palette's exact one.
    #[test]
    fn test_agrees_with_palette_crate() {
        use palette::{FromColor, LinSrgb, Srgb, Xyz};

        for &(r, g, b) in &[
            (0.0f32, 0.0f32, 0.0f32),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.2, 0.4, 0.8),
            (0.9, 0.7, 0.1),
        ] {
            let linear: LinSrgb = Srgb::new(r, g, b).into_linear();
            let reference: Xyz = Xyz::from_color(linear);
            let ours = srgb1_to_xyz100([r as f64, g as f64, b as f64]);
            assert!((ours[0] - 100.0 * reference.x as f64).abs() < 0.05);
            assert!((ours[1] - 100.0 * reference.y as f64).abs() < 0.05);
            assert!((ours[2] - 100.0 * reference.z as f64).abs() < 0.05);
        }
    }
}
