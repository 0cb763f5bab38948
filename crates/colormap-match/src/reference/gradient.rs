//! Gradient definitions and evaluation
//!
//! A gradient maps a position `t` in `[0, 1]` to an sRGB color with channels
//! in `[0, 1]`. Positions outside the unit interval are clamped and channel
//! values are clipped, so evaluation never fails.

/// One knot of a segmented channel: `(x, y_left, y_right)`.
///
/// `y_left` is the value approached from below `x` and `y_right` the value
/// leaving `x`. Equal values give a continuous channel.
pub type Knot = (f64, f64, f64);

/// Gradient shapes used by the reference catalog.
#[derive(Clone, Copy)]
pub enum Gradient {
    /// Piecewise linear per channel with optional discontinuities.
    Segmented([&'static [Knot]; 3]),
    /// Colors as `0xRRGGBB`, evenly spaced over `[0, 1]` and linearly
    /// interpolated.
    Even(&'static [u32]),
    /// Colors at explicit increasing positions, linearly interpolated.
    Anchored(&'static [(f64, [f64; 3])]),
    /// Qualitative lookup table: `t` selects entry `floor(t * len)`.
    Listed(&'static [u32]),
    /// One closed-form function per channel.
    Functional([fn(f64) -> f64; 3]),
    /// Lookup table of sRGB1 rows evenly spaced over `[0, 1]` and linearly
    /// interpolated, so `i / (len - 1)` returns row `i` exactly.
    Sampled(&'static [[f64; 3]]),
}

impl std::fmt::Debug for Gradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Gradient::Segmented(_) => "Segmented",
            Gradient::Even(_) => "Even",
            Gradient::Anchored(_) => "Anchored",
            Gradient::Listed(_) => "Listed",
            Gradient::Functional(_) => "Functional",
            Gradient::Sampled(_) => "Sampled",
        };
        f.debug_tuple(kind).finish_non_exhaustive()
    }
}

/// Split `0xRRGGBB` into channels in `[0, 1]`.
pub fn hex_rgb(hex: u32) -> [f64; 3] {
    [
        ((hex >> 16) & 0xff) as f64 / 255.0,
        ((hex >> 8) & 0xff) as f64 / 255.0,
        (hex & 0xff) as f64 / 255.0,
    ]
}

fn lerp3(a: [f64; 3], b: [f64; 3], f: f64) -> [f64; 3] {
    [
        a[0] + f * (b[0] - a[0]),
        a[1] + f * (b[1] - a[1]),
        a[2] + f * (b[2] - a[2]),
    ]
}

fn segmented_channel(knots: &[Knot], t: f64) -> f64 {
    let Some(first) = knots.first() else {
        return 0.0;
    };
    if t <= first.0 {
        return first.2;
    }
    for pair in knots.windows(2) {
        let (x0, _, right) = pair[0];
        let (x1, left, _) = pair[1];
        if t <= x1 {
            let span = x1 - x0;
            let f = if span > 0.0 { (t - x0) / span } else { 1.0 };
            return right + f * (left - right);
        }
    }
    knots[knots.len() - 1].1
}

fn anchored(stops: &[(f64, [f64; 3])], t: f64) -> [f64; 3] {
    let Some(first) = stops.first() else {
        return [0.0; 3];
    };
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (x0, c0) = pair[0];
        let (x1, c1) = pair[1];
        if t <= x1 {
            let span = x1 - x0;
            let f = if span > 0.0 { (t - x0) / span } else { 1.0 };
            return lerp3(c0, c1, f);
        }
    }
    stops[stops.len() - 1].1
}

fn even(colors: &[u32], t: f64) -> [f64; 3] {
    match colors.len() {
        0 => [0.0; 3],
        1 => hex_rgb(colors[0]),
        n => {
            let pos = t * (n - 1) as f64;
            let i = (pos.floor() as usize).min(n - 2);
            lerp3(hex_rgb(colors[i]), hex_rgb(colors[i + 1]), pos - i as f64)
        }
    }
}

fn listed(colors: &[u32], t: f64) -> [f64; 3] {
    if colors.is_empty() {
        return [0.0; 3];
    }
    let i = ((t * colors.len() as f64).floor() as usize).min(colors.len() - 1);
    hex_rgb(colors[i])
}

fn sampled(rows: &[[f64; 3]], t: f64) -> [f64; 3] {
    match rows.len() {
        0 => [0.0; 3],
        1 => rows[0],
        n => {
            let pos = t * (n - 1) as f64;
            let i = (pos.floor() as usize).min(n - 2);
            lerp3(rows[i], rows[i + 1], pos - i as f64)
        }
    }
}

impl Gradient {
    /// Evaluate at `t`, clamped to `[0, 1]`, returning clipped sRGB1.
    ///
    /// ```
    /// use colormap_match::Gradient;
    ///
    /// let grey = Gradient::Even(&[0x000000, 0xffffff]);
    /// assert_eq!(grey.eval(0.5), [0.5, 0.5, 0.5]);
    /// assert_eq!(grey.eval(7.0), [1.0, 1.0, 1.0]);
    /// ```
    pub fn eval(&self, t: f64) -> [f64; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let rgb = match self {
            Gradient::Segmented([r, g, b]) => [
                segmented_channel(r, t),
                segmented_channel(g, t),
                segmented_channel(b, t),
            ],
            Gradient::Even(colors) => even(colors, t),
            Gradient::Anchored(stops) => anchored(stops, t),
            Gradient::Listed(colors) => listed(colors, t),
            Gradient::Functional([r, g, b]) => [r(t), g(t), b(t)],
            Gradient::Sampled(rows) => sampled(rows, t),
        };
        rgb.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) })
    }

    /// Evaluate at `n` evenly spaced positions `i / (n - 1)`.
    ///
    /// A single sample is taken at `t = 0`.
    pub fn sample(&self, n: usize) -> Vec<[f64; 3]> {
        match n {
            0 => Vec::new(),
            1 => vec![self.eval(0.0)],
            _ => {
                let last = (n - 1) as f64;
                (0..n).map(|i| self.eval(i as f64 / last)).collect()
            }
        }
    }
}
