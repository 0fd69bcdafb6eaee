// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct() {
    let ids = [CANVAS_ID, ERROR_ID, CONTAINER_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn label_colors_are_css_hex() {
    for c in [LABEL_PLATE_FILL, LABEL_PLATE_STROKE, LABEL_TEXT_COLOR] {
        assert_eq!(c.len(), 7);
        assert!(c.starts_with('#'));
        assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn label_font_fits_the_plate() {
    // plate is 50px tall in the 512px layout
    assert!(LABEL_FONT_PX > 0.0 && LABEL_FONT_PX < 50.0);
    assert!(LABEL_PLATE_BORDER_PX > 0.0);
}
