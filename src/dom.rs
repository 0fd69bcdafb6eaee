use crate::viewport;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the new size in physical pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = viewport::backing_size(rect.width(), rect.height(), dpr);
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

/// True when `navigator.gpu` exists.
pub fn has_webgpu(window: &web::Window) -> bool {
    js_sys::Reflect::has(&window.navigator(), &"gpu".into()).unwrap_or(false)
}

/// Query string of the current page, e.g. `?mode=wave`.
pub fn location_query(window: &web::Window) -> String {
    window.location().search().unwrap_or_default()
}
