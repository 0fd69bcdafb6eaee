use super::SharedQueue;
use cubefield_core::{InputCommand, PointerSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Only the first active touch steers the camera.
#[inline]
fn first_touch(ev: &web::TouchEvent) -> Option<(f32, f32)> {
    ev.touches()
        .item(0)
        .map(|t| (t.client_x() as f32, t.client_y() as f32))
}

fn add_blocking_listener(target: &web::EventTarget, kind: &str, closure: &Closure<dyn FnMut(web::TouchEvent)>) {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
}

pub(super) fn wire(canvas: &web::HtmlCanvasElement, queue: &SharedQueue) {
    let q = queue.clone();
    let start = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some((x, y)) = first_touch(&ev) {
            q.borrow_mut().push(InputCommand::PointerDown {
                source: PointerSource::Touch,
                x,
                y,
            });
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    add_blocking_listener(canvas, "touchstart", &start);
    start.forget();

    let q = queue.clone();
    let moved = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some((x, y)) = first_touch(&ev) {
            q.borrow_mut().push(InputCommand::PointerMove {
                source: PointerSource::Touch,
                x,
                y,
            });
        }
        // keeps the page from scrolling under the drag
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    add_blocking_listener(canvas, "touchmove", &moved);
    moved.forget();

    let q = queue.clone();
    let end = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
        q.borrow_mut().push(InputCommand::PointerUp {
            source: PointerSource::Touch,
        });
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        for kind in ["touchend", "touchcancel"] {
            _ = wnd.add_event_listener_with_callback(kind, end.as_ref().unchecked_ref());
        }
    }
    end.forget();
}
