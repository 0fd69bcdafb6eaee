use crate::dom;
use crate::events::SharedQueue;
use crate::overlay;
use cubefield_core::gpu::GpuBackend;
use cubefield_core::{run_frame, InputCommand, Scene, SceneError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Scene,
    pub backend: GpuBackend<'static>,
    pub input: SharedQueue,
    pub halted: bool,
}

impl FrameContext {
    /// One animation frame. `Err` stops the loop.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<(), SceneError> {
        let commands = self.input.borrow_mut().drain();
        for c in &commands {
            if let InputCommand::Resize { width, height } = *c {
                self.backend.resize(width, height);
            }
        }
        run_frame(&mut self.scene, &mut self.backend, timestamp_ms, commands)?;
        Ok(())
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        let result = {
            let mut ctx = frame_ctx_tick.borrow_mut();
            if ctx.halted {
                return;
            }
            let r = ctx.frame(timestamp_ms);
            ctx.halted = r.is_err();
            r
        };
        if let Err(e) = result {
            log::error!("[frame] stopped: {e}");
            if let Some(doc) = dom::window_document() {
                overlay::show_error(&doc, &e.to_string());
            }
            return;
        }
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
