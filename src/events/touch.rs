use super::{log_reaction, InputWiring, ListenerSet};
use sparkle_core::Clock;
use web_sys as web;

#[inline]
fn first_touch(list: &web::TouchList) -> Option<(f64, f64)> {
    list.get(0)
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
}

pub fn wire(listeners: &mut ListenerSet, document: &web::Document, w: &InputWiring) {
    let start = w.clone();
    listeners.add(document, "touchstart", true, move |ev: web::TouchEvent| {
        let now = start.clock.now_ms();
        let r = start
            .driver
            .borrow_mut()
            .engine_mut()
            .touch_start(first_touch(&ev.touches()), now);
        log_reaction("touchstart", r);
    });

    let mv = w.clone();
    listeners.add(document, "touchmove", true, move |ev: web::TouchEvent| {
        let now = mv.clock.now_ms();
        mv.driver
            .borrow_mut()
            .engine_mut()
            .touch_move(first_touch(&ev.touches()), now);
    });

    let end = w.clone();
    listeners.add(document, "touchend", false, move |ev: web::TouchEvent| {
        let now = end.clock.now_ms();
        let r = end
            .driver
            .borrow_mut()
            .engine_mut()
            .touch_end(first_touch(&ev.changed_touches()), now);
        log_reaction("touchend", r);
    });

    let cancel = w.clone();
    listeners.add(document, "touchcancel", false, move |_: web::TouchEvent| {
        let now = cancel.clock.now_ms();
        let r = cancel.driver.borrow_mut().engine_mut().cancel_press(now);
        log_reaction("touchcancel", r);
    });
}
