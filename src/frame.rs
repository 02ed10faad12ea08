use crate::events::SharedDriver;
use sparkle_core::{Clock, FrameStatus, InstantClock};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop around a [`sparkle_core::FrameDriver`].
///
/// The tick reschedules itself only while the driver reports
/// `FrameStatus::Continue`; `pause` and `cancel` also drop the pending
/// request so no frame runs after them. Dropping the handle cancels.
pub struct LoopHandle {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn is_scheduled(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Request the next frame unless one is already pending.
    pub fn schedule(&self) {
        request(&self.tick, &self.pending);
    }

    pub fn pause(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }

    /// Stop scheduling for good and release the tick closure.
    pub fn cancel(&self) {
        self.pause();
        // The closure holds a clone of `tick`; dropping it breaks the cycle.
        self.tick.borrow_mut().take();
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request(tick: &Tick, pending: &Cell<Option<i32>>) {
    if pending.get().is_some() {
        return;
    }
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(driver: SharedDriver, clock: Rc<InstantClock>) -> LoopHandle {
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        let status = driver.borrow_mut().frame(clock.now_ms());
        if status == FrameStatus::Continue {
            request(&tick_clone, &pending_clone);
        }
    }) as Box<dyn FnMut()>));

    let handle = LoopHandle { tick, pending };
    handle.schedule();
    handle
}
