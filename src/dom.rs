use crate::constants::overlay_style;
use crate::input;
use sparkle_core::LayerRole;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    input::viewport_or_fallback(read(window.inner_width()), read(window.inner_height()))
}

/// Create a fixed overlay canvas for `role` and append it to `<body>`.
pub fn create_overlay_canvas(
    document: &web::Document,
    body: &web::HtmlElement,
    id: &str,
    role: LayerRole,
) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(stale) = document.get_element_by_id(id) {
        log::warn!("[dom] replacing stale #{} layer", id);
        stale.remove();
    }
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(id);
    canvas
        .set_attribute(
            "style",
            &overlay_style(role.z_index(), role.blend_mode().css_name()),
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_attribute("aria-hidden", "true").ok();
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
}
