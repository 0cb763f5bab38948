//! CIECAM02 appearance model and the CAM02-UCS projection
//!
//! Forward direction only: XYZ (Y of white = 100) -> J, M, h -> J'a'b'.
//!
//! # References
//!
//! - CIE 159:2004, "A colour appearance model for colour management systems:
//!   CIECAM02"
//! - M. R. Luo, G. Cui, C. Li, "Uniform colour spaces based on CIECAM02
//!   colour appearance model", Color Res. Appl. 31 (2006)

use std::f64::consts::PI;

use super::jab::Jab;

/// CAT02 chromatic adaptation matrix.
const M_CAT02: [[f64; 3]; 3] = [
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
];

/// Inverse of [`M_CAT02`].
const M_CAT02_INV: [[f64; 3]; 3] = [
    [1.096124, -0.278869, 0.182745],
    [0.454369, 0.473533, 0.072098],
    [-0.009628, -0.005698, 1.015326],
];

/// Hunt-Pointer-Estevez cone response matrix.
const M_HPE: [[f64; 3]; 3] = [
    [0.38971, 0.68898, -0.07868],
    [-0.22981, 1.18340, 0.04641],
    [0.0, 0.0, 1.0],
];

/// CAM02-UCS coefficients (K_L, c1, c2).
const UCS_KL: f64 = 1.0;
const UCS_C1: f64 = 0.007;
const UCS_C2: f64 = 0.0228;

/// Surround parameters (F, c, N_c).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surround {
    /// Degree of adaptation factor
    pub f: f64,
    /// Impact of surround
    pub c: f64,
    /// Chromatic induction factor
    pub n_c: f64,
}

impl Surround {
    /// Average surround (reflection prints, typical screen viewing).
    pub const AVERAGE: Surround = Surround {
        f: 1.0,
        c: 0.69,
        n_c: 1.0,
    };
    /// Dim surround (television).
    pub const DIM: Surround = Surround {
        f: 0.9,
        c: 0.59,
        n_c: 0.9,
    };
    /// Dark surround (projected slides in a dark room).
    pub const DARK: Surround = Surround {
        f: 0.8,
        c: 0.525,
        n_c: 0.8,
    };
}

/// CIECAM02 viewing conditions.
///
/// The default matches the conventional sRGB viewing setup: D65 white,
/// 20% background luminance, adapting luminance of 64 lux / pi / 5, and an
/// average surround.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    /// Reference white in XYZ, Y = 100
    pub white: [f64; 3],
    /// Relative background luminance Y_b
    pub y_b: f64,
    /// Adapting field luminance L_A in cd/m^2
    pub l_a: f64,
    /// Surround parameters
    pub surround: Surround,
}

impl Default for ViewingConditions {
    fn default() -> Self {
        Self {
            white: [95.047, 100.0, 108.883],
            y_b: 20.0,
            l_a: (64.0 / PI) / 5.0,
            surround: Surround::AVERAGE,
        }
    }
}

/// CIECAM02 forward model with all white-dependent terms precomputed.
#[derive(Debug, Clone)]
pub struct Cam02 {
    d_rgb: [f64; 3],
    f_l: f64,
    n: f64,
    z: f64,
    n_bb: f64,
    n_cb: f64,
    a_w: f64,
    c: f64,
    n_c: f64,
}

#[inline]
fn mat_vec(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Post-adaptation nonlinear cone compression.
#[inline]
fn compress(c: f64, f_l: f64) -> f64 {
    let x = (f_l * c.abs() / 100.0).powf(0.42);
    c.signum() * 400.0 * x / (x + 27.13) + 0.1
}

#[inline]
fn achromatic(rgb_a: [f64; 3], n_bb: f64) -> f64 {
    (2.0 * rgb_a[0] + rgb_a[1] + rgb_a[2] / 20.0 - 0.305) * n_bb
}

impl Cam02 {
    /// Precompute the model for the given viewing conditions.
    pub fn new(vc: &ViewingConditions) -> Self {
        let y_w = vc.white[1];
        let rgb_w = mat_vec(&M_CAT02, vc.white);

        let d = (vc.surround.f * (1.0 - (1.0 / 3.6) * ((-vc.l_a - 42.0) / 92.0).exp()))
            .clamp(0.0, 1.0);
        let d_rgb = rgb_w.map(|c| d * y_w / c + 1.0 - d);

        let k = 1.0 / (5.0 * vc.l_a + 1.0);
        let k4 = k.powi(4);
        let f_l = 0.2 * k4 * (5.0 * vc.l_a) + 0.1 * (1.0 - k4).powi(2) * (5.0 * vc.l_a).cbrt();

        let n = vc.y_b / y_w;
        let z = 1.48 + n.sqrt();
        let n_bb = 0.725 * (1.0 / n).powf(0.2);

        let mut model = Self {
            d_rgb,
            f_l,
            n,
            z,
            n_bb,
            n_cb: n_bb,
            a_w: 1.0,
            c: vc.surround.c,
            n_c: vc.surround.n_c,
        };
        let rgb_aw = model.adapted_cone_response(vc.white);
        model.a_w = achromatic(rgb_aw, n_bb);
        model
    }

    /// XYZ -> chromatically adapted, compressed Hunt-Pointer-Estevez response.
    fn adapted_cone_response(&self, xyz: [f64; 3]) -> [f64; 3] {
        let rgb = mat_vec(&M_CAT02, xyz);
        let rgb_c = [
            self.d_rgb[0] * rgb[0],
            self.d_rgb[1] * rgb[1],
            self.d_rgb[2] * rgb[2],
        ];
        let rgb_p = mat_vec(&M_HPE, mat_vec(&M_CAT02_INV, rgb_c));
        rgb_p.map(|c| compress(c, self.f_l))
    }

    /// Lightness J, colorfulness M and hue angle h (radians).
    pub fn jmh(&self, xyz: [f64; 3]) -> (f64, f64, f64) {
        let [r_a, g_a, b_a] = self.adapted_cone_response(xyz);

        let a = r_a - 12.0 * g_a / 11.0 + b_a / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let h = b.atan2(a).rem_euclid(2.0 * PI);

        let e_t = 0.25 * ((h + 2.0).cos() + 3.8);
        let big_a = achromatic([r_a, g_a, b_a], self.n_bb).max(0.0);
        let j = 100.0 * (big_a / self.a_w).powf(self.c * self.z);

        let t = (50000.0 / 13.0 * self.n_c * self.n_cb * e_t * a.hypot(b))
            / (r_a + g_a + 21.0 / 20.0 * b_a);
        let chroma = t.max(0.0).powf(0.9)
            * (j / 100.0).sqrt()
            * (1.64 - 0.29f64.powf(self.n)).powf(0.73);
        let m = chroma * self.f_l.powf(0.25);

        (j, m, h)
    }

    /// Project XYZ into CAM02-UCS.
    pub fn xyz100_to_jab(&self, xyz: [f64; 3]) -> Jab {
        let (j, m, h) = self.jmh(xyz);
        let j_p = (1.0 + 100.0 * UCS_C1) * j / (1.0 + UCS_C1 * j) / UCS_KL;
        let m_p = (1.0 + UCS_C2 * m).ln() / UCS_C2;
        Jab::new(j_p, m_p * h.cos(), m_p * h.sin())
    }
}

impl Default for Cam02 {
    fn default() -> Self {
        Self::new(&ViewingConditions::default())
    }
}
