//! CPU raster surface.
//!
//! `Pixmap` stores straight RGBA in `f32` and implements [`Surface`] with
//! per-pixel source-over blending, one logical pixel per stored pixel. Layers
//! are combined with [`Pixmap::composite`], which understands the two blend
//! modes the effect stacks.

use crate::color::Color;
use crate::render::{BlendMode, ColorStop, Surface};
use glam::DVec2;

pub type Rgba = [f32; 4];

#[derive(Clone, Debug)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut pixmap = Self::new(width, height);
        pixmap.pixels.fill(color.to_rgba());
        pixmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    /// True when no pixel carries any coverage.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p[3] <= 0.0)
    }

    /// 8-bit RGBA bytes, row-major, suitable for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let px: Vec<[u8; 4]> = self
            .pixels
            .iter()
            .map(|p| {
                [
                    to_byte(p[0]),
                    to_byte(p[1]),
                    to_byte(p[2]),
                    to_byte(p[3]),
                ]
            })
            .collect();
        bytemuck::cast_slice::<[u8; 4], u8>(&px).to_vec()
    }

    /// Blend `layer` over `self`. Sizes may differ; only the overlap is touched.
    pub fn composite(&mut self, layer: &Pixmap, mode: BlendMode) {
        let w = self.width.min(layer.width);
        let h = self.height.min(layer.height);
        for y in 0..h {
            for x in 0..w {
                let src = layer.pixels[layer.index(x, y)];
                if src[3] <= 0.0 {
                    continue;
                }
                let i = self.index(x, y);
                let dst = self.pixels[i];
                let src = match mode {
                    BlendMode::SourceOver => src,
                    BlendMode::SoftLight => soft_light_source(dst, src),
                };
                self.pixels[i] = source_over(dst, src);
            }
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Visit every pixel whose center lies within `radius` of `center`,
    /// passing the normalised distance (0 at the center, 1 at the rim).
    fn cover_disc(&mut self, center: DVec2, radius: f64, mut shade: impl FnMut(f64) -> Rgba) {
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }
        let x0 = ((center.x - radius).floor().max(0.0)) as u32;
        let y0 = ((center.y - radius).floor().max(0.0)) as u32;
        let x1 = ((center.x + radius).ceil().min(self.width as f64)).max(0.0) as u32;
        let y1 = ((center.y + radius).ceil().min(self.height as f64)).max(0.0) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = p.distance(center);
                if d > radius {
                    continue;
                }
                let src = shade(d / radius);
                let i = self.index(x, y);
                self.pixels[i] = source_over(self.pixels[i], src);
            }
        }
    }
}

impl Surface for Pixmap {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn resize(&mut self, width: f64, height: f64) {
        let w = width.round().max(1.0) as u32;
        let h = height.round().max(1.0) as u32;
        *self = Pixmap::new(w, h);
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn fill_radial(&mut self, center: DVec2, radius: f64, stops: &[ColorStop]) {
        if stops.is_empty() {
            return;
        }
        self.cover_disc(center, radius, |t| sample_stops(stops, t));
    }

    fn fill_disc(&mut self, center: DVec2, radius: f64, color: Color) {
        let rgba = color.to_rgba();
        self.cover_disc(center, radius, |_| rgba);
    }
}

/// Linear interpolation between the stops bracketing `t`; stops are assumed
/// sorted by offset.
pub fn sample_stops(stops: &[ColorStop], t: f64) -> Rgba {
    let first = &stops[0];
    if t <= first.offset {
        return first.color.to_rgba();
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let k = if span > 0.0 {
                ((t - a.offset) / span) as f32
            } else {
                1.0
            };
            let ca = a.color.to_rgba();
            let cb = b.color.to_rgba();
            return [
                ca[0] + (cb[0] - ca[0]) * k,
                ca[1] + (cb[1] - ca[1]) * k,
                ca[2] + (cb[2] - ca[2]) * k,
                ca[3] + (cb[3] - ca[3]) * k,
            ];
        }
    }
    stops[stops.len() - 1].color.to_rgba()
}

#[inline]
fn source_over(dst: Rgba, src: Rgba) -> Rgba {
    let sa = src[3];
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3];
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0.0; 4];
    }
    let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        out_a,
    ]
}

/// W3C soft-light, folded into the source color so the result can be laid
/// down with plain source-over.
fn soft_light_source(dst: Rgba, src: Rgba) -> Rgba {
    let da = dst[3];
    let blend = |cb: f32, cs: f32| {
        let b = if cs <= 0.5 {
            cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
        } else {
            let d = if cb <= 0.25 {
                ((16.0 * cb - 12.0) * cb + 4.0) * cb
            } else {
                cb.sqrt()
            };
            cb + (2.0 * cs - 1.0) * (d - cb)
        };
        (1.0 - da) * cs + da * b
    };
    [
        blend(dst[0], src[0]),
        blend(dst[1], src[1]),
        blend(dst[2], src[2]),
        src[3],
    ]
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
