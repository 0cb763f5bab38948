//! Named color spaces and batch conversion into CAM02-UCS

use std::fmt;
use std::str::FromStr;

use super::cam02::Cam02;
use super::error::ColorError;
use super::jab::Jab;
use super::srgb::srgb1_to_xyz100;

/// A color space a triple can be declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Device sRGB with channels in 0..=255
    Srgb255,
    /// Device sRGB with channels in 0.0..=1.0
    Srgb1,
    /// CAM02-UCS perceptual space (J', a', b')
    Cam02Ucs,
}

impl ColorSpace {
    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Srgb255 => "sRGB255",
            ColorSpace::Srgb1 => "sRGB1",
            ColorSpace::Cam02Ucs => "CAM02-UCS",
        }
    }

    /// Scale factor that brings this device space to sRGB1, if it is one.
    fn srgb_scale(self) -> Option<f64> {
        match self {
            ColorSpace::Srgb255 => Some(1.0 / 255.0),
            ColorSpace::Srgb1 => Some(1.0),
            ColorSpace::Cam02Ucs => None,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = ColorError;

    /// Parse a color space name. Matching is exact.
    ///
    /// ```
    /// use colormap_match::ColorSpace;
    ///
    /// assert_eq!("sRGB255".parse::<ColorSpace>().unwrap(), ColorSpace::Srgb255);
    /// assert!("HSV".parse::<ColorSpace>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sRGB255" => Ok(ColorSpace::Srgb255),
            "sRGB1" => Ok(ColorSpace::Srgb1),
            "CAM02-UCS" => Ok(ColorSpace::Cam02Ucs),
            other => Err(ColorError::invalid(other)),
        }
    }
}

/// Convert a sequence of triples from `from` into the perceptual space `to`.
///
/// The output has the same length and order as the input. `to` must be
/// [`ColorSpace::Cam02Ucs`]; converting out of the perceptual space is not
/// supported and fails with [`ColorError::InvalidColorSpace`].
///
/// # Example
///
/// ```
/// use colormap_match::{convert, ColorSpace};
///
/// let jab = convert(&[[0.0, 0.0, 0.0], [255.0, 0.0, 0.0]], ColorSpace::Srgb255, ColorSpace::Cam02Ucs).unwrap();
/// assert_eq!(jab.len(), 2);
/// assert!(jab[0].j.abs() < 1e-6);
/// assert!(jab[1].a > 0.0);
/// ```
pub fn convert(points: &[[f64; 3]], from: ColorSpace, to: ColorSpace) -> Result<Vec<Jab>, ColorError> {
    if to != ColorSpace::Cam02Ucs {
        return Err(ColorError::invalid(to.name()));
    }

    match from.srgb_scale() {
        None => Ok(points.iter().map(|&p| Jab::from_array(p)).collect()),
        Some(scale) => {
            let model = Cam02::default();
            Ok(points
                .iter()
                .map(|p| model.xyz100_to_jab(srgb1_to_xyz100(p.map(|c| c * scale))))
                .collect())
        }
    }
}

/// [`convert`] with the spaces given by name.
pub fn convert_named(points: &[[f64; 3]], from: &str, to: &str) -> Result<Vec<Jab>, ColorError> {
    convert(points, from.parse()?, to.parse()?)
}
