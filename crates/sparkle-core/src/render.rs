//! Immediate-mode painting of the two effect layers.
//!
//! The sparkle layer holds the crisp particles and sits on top with normal
//! blending. The highlight layer sits underneath, blended soft-light, and
//! carries the warm cursor glow plus a wide, faint light cast by every
//! particle. Anything that can fill circles and radial gradients can act as a
//! layer by implementing [`Surface`].

use crate::color::Color;
use crate::config::RenderParams;
use crate::particle::Sprite;
use glam::DVec2;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    /// 0 at the center, 1 at the rim.
    pub offset: f64,
    pub color: Color,
}

pub type Stops = SmallVec<[ColorStop; 5]>;

#[inline]
const fn stop(offset: f64, color: Color) -> ColorStop {
    ColorStop { offset, color }
}

/// A 2D raster target, cleared and repainted every frame. Coordinates are
/// logical surface pixels.
pub trait Surface {
    fn size(&self) -> (f64, f64);
    /// Reallocate to the new size. Contents are discarded.
    fn resize(&mut self, width: f64, height: f64);
    fn clear(&mut self);
    /// Disc of `radius` filled with a radial gradient centred on `center`.
    fn fill_radial(&mut self, center: DVec2, radius: f64, stops: &[ColorStop]);
    fn fill_disc(&mut self, center: DVec2, radius: f64, color: Color);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    SourceOver,
    SoftLight,
}

impl BlendMode {
    /// CSS `mix-blend-mode` keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "normal",
            BlendMode::SoftLight => "soft-light",
        }
    }
}

/// The two stacked layers of the effect, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerRole {
    Highlight,
    Sparkle,
}

impl LayerRole {
    pub const STACK: [LayerRole; 2] = [LayerRole::Highlight, LayerRole::Sparkle];

    pub fn blend_mode(self) -> BlendMode {
        match self {
            LayerRole::Highlight => BlendMode::SoftLight,
            LayerRole::Sparkle => BlendMode::SourceOver,
        }
    }

    pub fn z_index(self) -> i32 {
        match self {
            LayerRole::Highlight => 1,
            LayerRole::Sparkle => 9999,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayerRole::Highlight => "highlight",
            LayerRole::Sparkle => "sparkle",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Renderer {
    params: RenderParams,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderParams::default())
    }
}

impl Renderer {
    pub fn new(params: RenderParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Clear the highlight layer and repaint the cursor glow and the light
    /// cast by each particle.
    pub fn draw_highlight<S, I>(&self, surface: &mut S, pointer: DVec2, sprites: I)
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = Sprite>,
    {
        surface.clear();
        surface.fill_radial(pointer, self.params.cursor_glow_radius, &cursor_glow_stops());
        surface.fill_radial(pointer, self.params.cursor_core_radius, &cursor_core_stops());

        for sprite in sprites {
            let alpha = sprite.alpha();
            let radius = sprite.size * self.params.highlight_scale * alpha;
            if radius <= 0.0 {
                continue;
            }
            surface.fill_radial(sprite.position, radius, &highlight_stops(sprite.hue, alpha));
        }
    }

    /// Paint particles onto an already cleared sparkle layer.
    pub fn draw_sparkles<S, I>(&self, surface: &mut S, sprites: I)
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = Sprite>,
    {
        for sprite in sprites {
            self.draw_sparkle(surface, &sprite);
        }
    }

    /// Soft outer glow at `glow_scale` times the core radius, then the solid
    /// bright core.
    pub fn draw_sparkle<S: Surface + ?Sized>(&self, surface: &mut S, sprite: &Sprite) {
        let radius = sprite.radius();
        if radius <= 0.0 {
            return;
        }
        let alpha = sprite.alpha();
        surface.fill_radial(
            sprite.position,
            radius * self.params.glow_scale,
            &sparkle_glow_stops(sprite.hue, alpha),
        );
        surface.fill_disc(sprite.position, radius, Color::hsla(sprite.hue, 100.0, 90.0, alpha));
    }
}

pub fn cursor_glow_stops() -> Stops {
    smallvec![
        stop(0.0, Color::rgba(255, 230, 180, 0.25)),
        stop(0.3, Color::rgba(255, 215, 150, 0.15)),
        stop(0.6, Color::rgba(212, 175, 55, 0.08)),
        stop(0.85, Color::rgba(212, 175, 55, 0.02)),
        stop(1.0, Color::rgba(212, 175, 55, 0.0)),
    ]
}

pub fn cursor_core_stops() -> Stops {
    smallvec![
        stop(0.0, Color::rgba(255, 245, 220, 0.4)),
        stop(0.4, Color::rgba(255, 235, 190, 0.2)),
        stop(0.7, Color::rgba(255, 220, 160, 0.08)),
        stop(1.0, Color::rgba(255, 215, 150, 0.0)),
    ]
}

pub fn sparkle_glow_stops(hue: f64, alpha: f64) -> Stops {
    smallvec![
        stop(0.0, Color::hsla(hue, 100.0, 70.0, alpha * 0.8)),
        stop(0.5, Color::hsla(hue, 100.0, 50.0, alpha * 0.3)),
        stop(1.0, Color::hsla(hue, 100.0, 30.0, 0.0)),
    ]
}

pub fn highlight_stops(hue: f64, alpha: f64) -> Stops {
    smallvec![
        stop(0.0, Color::hsla(hue, 100.0, 85.0, alpha * 0.3)),
        stop(0.4, Color::hsla(hue, 100.0, 75.0, alpha * 0.15)),
        stop(0.7, Color::hsla(hue, 80.0, 65.0, alpha * 0.08)),
        stop(1.0, Color::hsla(hue, 80.0, 60.0, 0.0)),
    ]
}
