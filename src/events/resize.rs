use super::SharedQueue;
use crate::dom;
use cubefield_core::InputCommand;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub(super) fn wire(canvas: &web::HtmlCanvasElement, queue: &SharedQueue) {
    let canvas = canvas.clone();
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&canvas);
        queue
            .borrow_mut()
            .push(InputCommand::Resize { width, height });
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
