// DOM-side constants for the overlay canvases.
//
// Kept free of web-sys types so host tests can `include!` this file.

// Element ids; a stale layer with the same id is replaced on mount
pub const HIGHLIGHT_CANVAS_ID: &str = "sparkle-highlight";
pub const SPARKLE_CANVAS_ID: &str = "sparkle-canvas";

// Backing store scale cap
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Fallback viewport when the window reports nothing usable
pub const FALLBACK_VIEWPORT: (f64, f64) = (800.0, 600.0);

/// Inline CSS for a fixed, full-viewport layer that never takes input.
pub fn overlay_style(z_index: i32, blend_mode: &str) -> String {
    format!(
        "position:fixed;top:0;left:0;width:100vw;height:100vh;\
         pointer-events:none;z-index:{z_index};mix-blend-mode:{blend_mode};"
    )
}
