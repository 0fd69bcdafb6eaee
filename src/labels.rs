use crate::constants::*;
use crate::viewport::{label_scale, label_text_anchor};
use anyhow::anyhow;
use cubefield_core::labels::{plate_rect, LabelImage, LabelRasterizer};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draws labels with the browser's 2D canvas: transparent background, white
/// plate with a grey border, red centered text.
pub struct CanvasRasterizer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasRasterizer {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow!("{:?}", e))?;
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }
}

impl LabelRasterizer for CanvasRasterizer {
    fn rasterize(&mut self, text: &str, size: u32) -> anyhow::Result<LabelImage> {
        self.canvas.set_width(size);
        self.canvas.set_height(size);
        let ctx = &self.ctx;
        let k = label_scale(size);
        let s = size as f64;
        ctx.clear_rect(0.0, 0.0, s, s);

        let [x, y, w, h] = plate_rect(size).map(|v| v as f64);
        ctx.set_line_width(LABEL_PLATE_BORDER_PX * k);
        ctx.set_stroke_style_str(LABEL_PLATE_STROKE);
        ctx.stroke_rect(x, y, w, h);
        ctx.set_fill_style_str(LABEL_PLATE_FILL);
        ctx.fill_rect(x, y, w, h);

        ctx.set_font(&format!("{}px {}", LABEL_FONT_PX * k, LABEL_FONT_FAMILY));
        ctx.set_text_align("center");
        ctx.set_fill_style_str(LABEL_TEXT_COLOR);
        let (tx, ty, max_w) = label_text_anchor(size);
        ctx.fill_text_with_max_width(text, tx, ty, max_w)
            .map_err(|e| anyhow!("{:?}", e))?;

        let data = ctx
            .get_image_data(0.0, 0.0, s, s)
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(LabelImage {
            size,
            rgba: data.data().0,
        })
    }
}
