#![cfg(target_arch = "wasm32")]
use sparkle_core::{FrameDriver, InstantClock, LayerRole, SparkleConfig, SparkleEngine, Surface};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod lifecycle;

use canvas::CanvasSurface;
use constants::{HIGHLIGHT_CANVAS_ID, SPARKLE_CANVAS_ID};
use events::{InputWiring, ListenerSet, SharedDriver};
use lifecycle::{Cleanup, Slot, Ticket};

/// A live overlay. Dropping it stops the loop, detaches every listener and
/// takes both canvases out of the page.
struct Mounted {
    driver: SharedDriver,
    listeners: ListenerSet,
    frame_loop: frame::LoopHandle,
    cleanup: Cleanup,
}

impl Mounted {
    fn pause(&self) {
        self.driver.borrow_mut().stop();
        self.frame_loop.pause();
    }

    fn resume(&self) {
        if self.driver.borrow_mut().start() {
            self.frame_loop.schedule();
        }
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.frame_loop.cancel();
        self.listeners.remove_all();
        self.driver.borrow_mut().cancel();
        self.cleanup.run();
        log::info!("[sparkle] effect destroyed");
    }
}

thread_local! {
    // One overlay per page; its canvases use fixed element ids.
    static MOUNTED: RefCell<Slot<Mounted>> = const { RefCell::new(Slot::new()) };
}

fn with_current<T>(f: impl FnOnce(&Mounted) -> T) -> Option<T> {
    MOUNTED.with(|slot| slot.borrow().current().map(f))
}

fn evict_current() {
    // Taken out first so the teardown runs without the slot borrowed.
    let previous = MOUNTED.with(|slot| slot.borrow_mut().evict());
    if previous.is_some() {
        log::info!("[sparkle] replacing the running effect");
    }
    drop(previous);
}

fn install(mounted: Mounted) -> Ticket {
    let (ticket, displaced) = MOUNTED.with(|slot| slot.borrow_mut().install(mounted));
    drop(displaced);
    ticket
}

/// Handle to the sparkle overlay.
///
/// Constructing one replaces any overlay already running. A handle whose
/// overlay was replaced, destroyed or never mounted (no `<body>`, no 2D
/// context) is inert: every method is a no-op.
#[wasm_bindgen]
pub struct SparkleEffect {
    ticket: Option<Ticket>,
}

impl SparkleEffect {
    fn with_mounted<T>(&self, f: impl FnOnce(&Mounted) -> T) -> Option<T> {
        let ticket = self.ticket?;
        MOUNTED.with(|slot| slot.borrow().get(ticket).map(f))
    }
}

#[wasm_bindgen]
impl SparkleEffect {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SparkleEffect, JsValue> {
        evict_current();
        let mounted = mount().map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        Ok(SparkleEffect {
            ticket: mounted.map(install),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.with_mounted(|_| ()).is_some()
    }

    /// Stop animating; particles freeze in place until `resume`.
    pub fn pause(&self) {
        self.with_mounted(Mounted::pause);
    }

    pub fn resume(&self) {
        self.with_mounted(Mounted::resume);
    }

    /// Detach listeners, stop the loop and remove both canvases.
    pub fn destroy(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            let mounted = MOUNTED.with(|slot| slot.borrow_mut().take(ticket));
            drop(mounted);
        }
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.with_mounted(|m| m.driver.borrow().engine().store().len() as u32)
            .unwrap_or(0)
    }

    /// `{ frames, free, orbital }` from the most recent frame.
    pub fn stats(&self) -> JsValue {
        let obj = js_sys::Object::new();
        if let Some(s) = self.with_mounted(|m| m.driver.borrow().stats()) {
            _ = js_sys::Reflect::set(&obj, &"frames".into(), &JsValue::from_f64(s.frames as f64));
            _ = js_sys::Reflect::set(&obj, &"free".into(), &JsValue::from_f64(s.free as f64));
            _ = js_sys::Reflect::set(&obj, &"orbital".into(), &JsValue::from_f64(s.orbital as f64));
        }
        obj.into()
    }
}

// `free()` from JS lands here; the overlay goes with its handle.
impl Drop for SparkleEffect {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn layer(
    document: &web::Document,
    body: &web::HtmlElement,
    role: LayerRole,
    cleanup: &mut Cleanup,
) -> anyhow::Result<Option<CanvasSurface>> {
    let id = match role {
        LayerRole::Highlight => HIGHLIGHT_CANVAS_ID,
        LayerRole::Sparkle => SPARKLE_CANVAS_ID,
    };
    let canvas = dom::create_overlay_canvas(document, body, id, role)?;
    let appended = canvas.clone();
    cleanup.defer(move || appended.remove());
    let Some(ctx) = dom::context_2d(&canvas) else {
        log::warn!("[dom] no 2d context for the {} layer", role.label());
        return Ok(None);
    };
    Ok(Some(CanvasSurface::new(canvas, ctx)))
}

/// Build both layers, the engine and the input wiring. Any early return,
/// error or not, drops `cleanup` and removes the canvases appended so far.
fn mount() -> anyhow::Result<Option<Mounted>> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let Some(body) = document.body() else {
        log::warn!("[dom] no <body>; sparkles disabled");
        return Ok(None);
    };

    let mut cleanup = Cleanup::new();
    // Highlight first so the sparkle layer follows it in document order.
    let Some(highlight) = layer(&document, &body, LayerRole::Highlight, &mut cleanup)? else {
        return Ok(None);
    };
    let Some(sparkle) = layer(&document, &body, LayerRole::Sparkle, &mut cleanup)? else {
        return Ok(None);
    };

    let engine = SparkleEngine::new(SparkleConfig::default())?;
    let mut driver = FrameDriver::new(engine, sparkle, highlight);
    let (width, height) = dom::viewport_size(&window);
    driver.resize(width, height);
    driver.start();
    let driver: SharedDriver = Rc::new(RefCell::new(driver));
    let clock = Rc::new(InstantClock::new());

    let mut listeners = ListenerSet::new();
    events::wire_input_handlers(
        &mut listeners,
        &window,
        &document,
        &InputWiring {
            driver: driver.clone(),
            clock: clock.clone(),
        },
    );
    let frame_loop = frame::start_loop(driver.clone(), clock);

    {
        let d = driver.borrow();
        let (w, h) = d.sparkle_surface().size();
        log::info!("[sparkle] mounted {:.0}x{:.0}", w, h);
    }
    Ok(Some(Mounted {
        driver,
        listeners,
        frame_loop,
        cleanup,
    }))
}

fn mount_active() {
    if MOUNTED.with(|slot| slot.borrow().is_occupied()) {
        return;
    }
    match mount() {
        Ok(Some(mounted)) => {
            install(mounted);
        }
        Ok(None) => {}
        Err(e) => log::error!("[sparkle] init error: {:?}", e),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sparkle-web starting");

    let Some((_, document)) = dom::window_document() else {
        log::warn!("[dom] no document; sparkles disabled");
        return Ok(());
    };
    if document.body().is_some() {
        mount_active();
        return Ok(());
    }
    let on_ready = Closure::once(mount_active);
    _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
    on_ready.forget();
    Ok(())
}

#[wasm_bindgen]
pub fn pause_sparkles() {
    with_current(Mounted::pause);
}

#[wasm_bindgen]
pub fn resume_sparkles() {
    with_current(Mounted::resume);
}

#[wasm_bindgen]
pub fn destroy_sparkles() {
    let mounted = MOUNTED.with(|slot| slot.borrow_mut().evict());
    drop(mounted);
}
