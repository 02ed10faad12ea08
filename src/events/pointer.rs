use super::{log_reaction, InputWiring, ListenerSet};
use crate::dom;
use sparkle_core::Clock;
use web_sys as web;

const PRIMARY_BUTTON: i16 = 0;

#[inline]
fn client_point(ev: &web::MouseEvent) -> (f64, f64) {
    (ev.client_x() as f64, ev.client_y() as f64)
}

pub fn wire(
    listeners: &mut ListenerSet,
    window: &web::Window,
    document: &web::Document,
    w: &InputWiring,
) {
    wire_mousemove(listeners, document, w);
    wire_buttons(listeners, document, w);
    wire_click(listeners, document, w);
    wire_blur(listeners, window, w);
    wire_resize(listeners, window, w);
}

fn wire_mousemove(listeners: &mut ListenerSet, document: &web::Document, w: &InputWiring) {
    let w = w.clone();
    listeners.add(document, "mousemove", false, move |ev: web::MouseEvent| {
        let (x, y) = client_point(&ev);
        let now = w.clock.now_ms();
        w.driver.borrow_mut().engine_mut().pointer_move(x, y, now);
    });
}

fn wire_buttons(listeners: &mut ListenerSet, document: &web::Document, w: &InputWiring) {
    let down = w.clone();
    listeners.add(document, "mousedown", false, move |ev: web::MouseEvent| {
        if ev.button() != PRIMARY_BUTTON {
            return;
        }
        let (x, y) = client_point(&ev);
        let now = down.clock.now_ms();
        let r = down.driver.borrow_mut().engine_mut().pointer_down(x, y, now);
        log_reaction("mousedown", r);
    });

    let up = w.clone();
    listeners.add(document, "mouseup", false, move |ev: web::MouseEvent| {
        if ev.button() != PRIMARY_BUTTON {
            return;
        }
        let (x, y) = client_point(&ev);
        let now = up.clock.now_ms();
        let r = up.driver.borrow_mut().engine_mut().pointer_up(x, y, now);
        log_reaction("mouseup", r);
    });
}

fn wire_click(listeners: &mut ListenerSet, document: &web::Document, w: &InputWiring) {
    let w = w.clone();
    listeners.add(document, "click", false, move |ev: web::MouseEvent| {
        let (x, y) = client_point(&ev);
        let now = w.clock.now_ms();
        let r = w.driver.borrow_mut().engine_mut().click(x, y, now);
        log_reaction("click", r);
    });
}

// Focus loss mid-press never delivers a mouseup.
fn wire_blur(listeners: &mut ListenerSet, window: &web::Window, w: &InputWiring) {
    let w = w.clone();
    listeners.add(window, "blur", false, move |_: web::Event| {
        let now = w.clock.now_ms();
        let r = w.driver.borrow_mut().engine_mut().cancel_press(now);
        log_reaction("blur", r);
    });
}

fn wire_resize(listeners: &mut ListenerSet, window: &web::Window, w: &InputWiring) {
    let w = w.clone();
    let window_for_size = window.clone();
    listeners.add(window, "resize", false, move |_: web::Event| {
        let (width, height) = dom::viewport_size(&window_for_size);
        w.driver.borrow_mut().resize(width, height);
    });
}
