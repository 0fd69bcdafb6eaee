#![cfg(target_arch = "wasm32")]
use cubefield_core::{parse_query, InputQueue, PlateRasterizer, Scene, SceneError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod labels;
mod overlay;
mod render;
mod viewport;

use constants::{CANVAS_ID, NO_WEBGPU_MESSAGE};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cubefield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            let fallback_shown = matches!(
                e.downcast_ref::<SceneError>(),
                Some(SceneError::BackendUnavailable(_))
            );
            if fallback_shown {
                return;
            }
            if let Some(doc) = dom::window_document() {
                overlay::show_error(&doc, &format!("{e:#}"));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if !dom::has_webgpu(&window) {
        overlay::show_fallback(&document, NO_WEBGPU_MESSAGE);
        return Err(SceneError::BackendUnavailable("navigator.gpu missing".into()).into());
    }

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (preset, side) = parse_query(&dom::location_query(&window))?;
    let config = preset.config(side);
    log::info!("[scene] mode={} grid={:?}", preset, config.grid);

    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    let scene = Scene::new(config, width, height)?;

    let backend = match labels::CanvasRasterizer::new(&document) {
        Ok(mut raster) => render::create_backend(&canvas, scene.config(), &mut raster).await,
        Err(e) => {
            log::warn!("[labels] canvas text unavailable ({e}), drawing plates only");
            render::create_backend(&canvas, scene.config(), &mut PlateRasterizer).await
        }
    };
    let backend = match backend {
        Ok(b) => b,
        Err(e @ SceneError::BackendUnavailable(_)) => {
            overlay::show_fallback(&document, NO_WEBGPU_MESSAGE);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    overlay::hide_error(&document);

    let input = Rc::new(RefCell::new(InputQueue::default()));
    events::wire_input_handlers(&canvas, &input);

    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext {
        scene,
        backend,
        input,
        halted: false,
    })));
    Ok(())
}
