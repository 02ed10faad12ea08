//! DOM listener wiring. Every listener is tracked in a [`ListenerSet`] so
//! teardown can detach exactly what mount attached.

use crate::canvas::CanvasSurface;
use sparkle_core::{FrameDriver, InstantClock, Reaction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod pointer;
pub mod touch;

pub type SharedDriver = Rc<RefCell<FrameDriver<CanvasSurface>>>;

/// Everything a handler needs: the driver and the clock that timestamps
/// both input and frames.
#[derive(Clone)]
pub struct InputWiring {
    pub driver: SharedDriver,
    pub clock: Rc<InstantClock>,
}

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` for `kind` on `target`. Events that are not an `E`
    /// are dropped.
    pub fn add<E, F>(&mut self, target: &web::EventTarget, kind: &'static str, passive: bool, mut handler: F)
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);

        let options = web::AddEventListenerOptions::new();
        options.set_passive(passive);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            log::warn!("[input] failed to add {} listener: {:?}", kind, e);
            return;
        }
        self.entries.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove_all(&mut self) {
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.remove_all();
    }
}

/// Log the interesting outcomes; trail emission is too frequent to report.
pub(crate) fn log_reaction(source: &str, reaction: Reaction) {
    match reaction {
        Reaction::Burst(n) => log::debug!("[input] {} burst: {} particles", source, n),
        Reaction::Dispersed(n) => log::debug!("[input] {} released {} orbitals", source, n),
        Reaction::Ignored => log::trace!("[input] {} ignored", source),
        Reaction::Nothing | Reaction::Trail(_) => {}
    }
}

pub fn wire_input_handlers(
    listeners: &mut ListenerSet,
    window: &web::Window,
    document: &web::Document,
    w: &InputWiring,
) {
    pointer::wire(listeners, window, document, w);
    touch::wire(listeners, document, w);
    log::info!("[input] {} listeners attached", listeners.len());
}
