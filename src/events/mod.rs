//! DOM listeners. Every handler only pushes an `InputCommand`.

mod pointer;
mod resize;
mod touch;

use cubefield_core::InputQueue;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub type SharedQueue = Rc<RefCell<InputQueue>>;

pub fn wire_input_handlers(canvas: &web::HtmlCanvasElement, queue: &SharedQueue) {
    pointer::wire(canvas, queue);
    touch::wire(canvas, queue);
    resize::wire(canvas, queue);
}
