use super::SharedQueue;
use cubefield_core::{InputCommand, PointerSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Touch pointers are handled through the touch events.
#[inline]
fn is_mouse(ev: &web::PointerEvent) -> bool {
    matches!(ev.pointer_type().as_str(), "mouse" | "pen" | "")
}

pub(super) fn wire(canvas: &web::HtmlCanvasElement, queue: &SharedQueue) {
    wire_pointerdown(canvas, queue);
    wire_pointermove(queue);
    wire_pointerup(queue);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, queue: &SharedQueue) {
    let queue = queue.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !is_mouse(&ev) {
            return;
        }
        queue.borrow_mut().push(InputCommand::PointerDown {
            source: PointerSource::Mouse,
            x: ev.client_x() as f32,
            y: ev.client_y() as f32,
        });
        _ = target.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(queue: &SharedQueue) {
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !is_mouse(&ev) {
            return;
        }
        queue.borrow_mut().push(InputCommand::PointerMove {
            source: PointerSource::Mouse,
            x: ev.client_x() as f32,
            y: ev.client_y() as f32,
        });
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(queue: &SharedQueue) {
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !is_mouse(&ev) {
            return;
        }
        queue.borrow_mut().push(InputCommand::PointerUp {
            source: PointerSource::Mouse,
        });
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        for kind in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}
