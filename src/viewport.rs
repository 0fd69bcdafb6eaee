// Pure sizing helpers; kept free of web-sys so host tests can include them.

/// Canvas backing store for a CSS box at `dpr`, never smaller than 1x1.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let w = (css_width * dpr).max(0.0) as u32;
    let h = (css_height * dpr).max(0.0) as u32;
    (w.max(1), h.max(1))
}

/// Scale from the 512px layout the label constants are written in.
#[inline]
pub fn label_scale(texture_size: u32) -> f64 {
    texture_size as f64 / 512.0
}

/// Text is centered on the plate; callers pass `(x, y, max_width)`.
#[inline]
pub fn label_text_anchor(texture_size: u32) -> (f64, f64, f64) {
    let k = label_scale(texture_size);
    (256.0 * k, 256.0 * k, 512.0 * k)
}
