//! CAM02-UCS color type
//!
//! CAM02-UCS (Luo, Cui & Li, 2006) rescales the CIECAM02 lightness and
//! colorfulness correlates so that Euclidean distance tracks perceived color
//! difference. One unit is roughly one just-noticeable difference.

/// A color in CAM02-UCS (J'a'b') perceptual color space.
///
/// # Components
///
/// - `j`: Lightness J' (0.0 = black, ~100.0 = diffuse white)
/// - `a`: Red-green axis a' (positive = red)
/// - `b`: Yellow-blue axis b' (positive = yellow)
///
/// Values are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jab {
    /// Lightness J'
    pub j: f64,
    /// Red-green axis a'
    pub a: f64,
    /// Yellow-blue axis b'
    pub b: f64,
}

impl Jab {
    /// Create a new J'a'b' color.
    ///
    /// # Example
    ///
    /// ```
    /// use colormap_match::Jab;
    ///
    /// let mid_grey = Jab::new(50.0, 0.0, 0.0);
    /// assert_eq!(mid_grey.j, 50.0);
    /// ```
    #[inline]
    pub fn new(j: f64, a: f64, b: f64) -> Self {
        Self { j, a, b }
    }

    /// Build from a `[J', a', b']` triple.
    #[inline]
    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Return the `[J', a', b']` triple.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.j, self.a, self.b]
    }

    /// Squared Euclidean distance, for comparisons that do not need the root.
    #[inline]
    pub fn distance_squared(self, other: Jab) -> f64 {
        let dj = self.j - other.j;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dj * dj + da * da + db * db
    }

    /// Euclidean distance in J'a'b' (perceptual color difference).
    ///
    /// # Example
    ///
    /// ```
    /// use colormap_match::Jab;
    ///
    /// let x = Jab::new(50.0, 0.0, 0.0);
    /// let y = Jab::new(53.0, 4.0, 0.0);
    /// assert!((x.distance(y) - 5.0).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn distance(self, other: Jab) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Chroma-like magnitude `sqrt(a'^2 + b'^2)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

impl From<[f64; 3]> for Jab {
    fn from(v: [f64; 3]) -> Self {
        Self::from_array(v)
    }
}
