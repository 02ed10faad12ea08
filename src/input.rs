// Pure helpers for turning DOM measurements into engine coordinates.
// No web-sys types here so the file can be exercised on the host.

use super::constants::{FALLBACK_VIEWPORT, MAX_DEVICE_PIXEL_RATIO};

/// Device pixel ratio limited to `[1, MAX_DEVICE_PIXEL_RATIO]`; junk reads as 1.
#[inline]
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Viewport in CSS pixels, falling back when the window reports zero or NaN.
#[inline]
pub fn viewport_or_fallback(width: f64, height: f64) -> (f64, f64) {
    if width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0 {
        (width, height)
    } else {
        FALLBACK_VIEWPORT
    }
}

/// Canvas backing store size for a CSS-pixel viewport.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = clamp_dpr(dpr);
    let w = (css_width * dpr).round().max(1.0) as u32;
    let h = (css_height * dpr).round().max(1.0) as u32;
    (w, h)
}
