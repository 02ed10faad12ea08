/// Paint color in either of the two notations the renderer uses.
///
/// Saturation and lightness are CSS percentages (0..=100), hue is degrees and
/// alpha is 0..=1, so a color maps one-to-one onto a canvas style string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgba { r: u8, g: u8, b: u8, a: f64 },
    Hsla { h: f64, s: f64, l: f64, a: f64 },
}

impl Color {
    pub const TRANSPARENT: Color = Color::Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba { r, g, b, a }
    }

    #[inline]
    pub const fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Color::Hsla { h, s, l, a }
    }

    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Rgba { a, .. } | Color::Hsla { a, .. } => a,
        }
    }

    pub fn to_css(&self) -> String {
        match *self {
            Color::Rgba { r, g, b, a } => format!("rgba({}, {}, {}, {:.3})", r, g, b, clamp_alpha(a)),
            Color::Hsla { h, s, l, a } => format!(
                "hsla({:.1}, {:.0}%, {:.0}%, {:.3})",
                h,
                s,
                l,
                clamp_alpha(a)
            ),
        }
    }

    /// Straight (non-premultiplied) RGBA with every channel in 0..=1.
    pub fn to_rgba(&self) -> [f32; 4] {
        match *self {
            Color::Rgba { r, g, b, a } => [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                clamp_alpha(a) as f32,
            ],
            Color::Hsla { h, s, l, a } => {
                let [r, g, b] = hsl_to_rgb(h, s, l);
                [r as f32, g as f32, b as f32, clamp_alpha(a) as f32]
            }
        }
    }
}

#[inline]
fn clamp_alpha(a: f64) -> f64 {
    if a.is_nan() {
        0.0
    } else {
        a.clamp(0.0, 1.0)
    }
}

/// CSS HSL to RGB, channels in 0..=1.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
