//! Text labels floating on the cube grid.
//!
//! Each cell gets one string, rasterized once into a square RGBA image at
//! startup and drawn every frame as a camera-facing quad.

use crate::instances::GridBounds;
use glam::{IVec3, Vec3};

pub const DEFAULT_LABELS: [&str; 27] = [
    "Ship it",
    "Works on my machine",
    "Needs a refactor",
    "Per my last email",
    "Quick sync",
    "Circle back",
    "Low-hanging fruit",
    "Out of scope",
    "Add a ticket",
    "Blocked",
    "Hotfix",
    "It's a feature",
    "Take it offline",
    "Deep dive",
    "Move fast",
    "Tech debt",
    "Rubber duck",
    "Bikeshedding",
    "Edge case",
    "Happy path",
    "Cache it",
    "Off by one",
    "Rollback",
    "LGTM",
    "Nit",
    "Friday deploy",
    "Yak shaving",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub cell_index: usize,
    pub cell: IVec3,
}

/// Pairs strings with cells in build order. `texts` must cover every cell.
pub fn layout_labels<S: AsRef<str>>(bounds: &GridBounds, texts: &[S]) -> Vec<Label> {
    debug_assert!(
        texts.len() as u64 >= bounds.cell_count(),
        "{} labels for {} cells",
        texts.len(),
        bounds.cell_count()
    );
    bounds
        .cells()
        .zip(texts)
        .enumerate()
        .map(|(cell_index, (cell, text))| Label {
            text: text.as_ref().to_owned(),
            cell_index,
            cell,
        })
        .collect()
}

/// Centre of the labelled cube before expansion; the label shader scales it
/// by `expand` together with the cubes.
#[inline]
pub fn label_center(cell: IVec3, origin: Vec3) -> Vec3 {
    cell.as_vec3() + origin
}

/// Square RGBA8 image, row-major, `size * size * 4` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelImage {
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl LabelImage {
    pub fn transparent(size: u32) -> Self {
        Self {
            size,
            rgba: vec![0; (size as usize).pow(2) * 4],
        }
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 4]) {
        let (x1, y1) = (x1.min(self.size), y1.min(self.size));
        for y in y0..y1 {
            for x in x0..x1 {
                let i = ((y * self.size + x) * 4) as usize;
                self.rgba[i..i + 4].copy_from_slice(&color);
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.size + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

pub trait LabelRasterizer {
    fn rasterize(&mut self, text: &str, size: u32) -> anyhow::Result<LabelImage>;
}

// Name plate, in units of a 512px canvas.
pub const PLATE_RECT: [f32; 4] = [80.0, 220.0, 370.0, 50.0];
const PLATE_FILL: [u8; 4] = [255, 255, 255, 255];
const PLATE_BORDER: [u8; 4] = [170, 170, 170, 255];

/// Plate rectangle `(x, y, w, h)` in pixels for a `size`-pixel image.
pub fn plate_rect(size: u32) -> [u32; 4] {
    let k = size as f32 / 512.0;
    PLATE_RECT.map(|v| (v * k).round() as u32)
}

/// Draws the name plate only. Used where no font stack is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlateRasterizer;

impl LabelRasterizer for PlateRasterizer {
    fn rasterize(&mut self, _text: &str, size: u32) -> anyhow::Result<LabelImage> {
        anyhow::ensure!(size >= 8, "label texture size {size} too small");
        let mut img = LabelImage::transparent(size);
        let [x, y, w, h] = plate_rect(size);
        let border = (size / 256).max(1);
        img.fill_rect(x, y, x + w, y + h, PLATE_BORDER);
        img.fill_rect(x + border, y + border, x + w - border, y + h - border, PLATE_FILL);
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_label_per_cell_in_build_order() {
        let b = GridBounds::cube(3);
        let labels = layout_labels(&b, &DEFAULT_LABELS);
        assert_eq!(labels.len(), 27);
        assert_eq!(labels[1].cell, IVec3::new(1, 0, 0));
        assert_eq!(labels[26].text, DEFAULT_LABELS[26]);
    }

    #[test]
    fn label_centers_sit_on_the_recentred_grid() {
        let origin = -GridBounds::cube(3).center();
        assert_eq!(label_center(IVec3::ZERO, origin), Vec3::splat(-1.0));
        assert_eq!(label_center(IVec3::new(1, 1, 1), origin), Vec3::ZERO);
    }

    #[test]
    fn plate_is_opaque_and_corners_transparent() {
        let img = PlateRasterizer.rasterize("x", 256).unwrap();
        assert_eq!(img.rgba.len(), 256 * 256 * 4);
        assert_eq!(img.pixel(0, 0)[3], 0);
        assert_eq!(img.pixel(128, 128), [255, 255, 255, 255]);
        let [x, y, _, _] = plate_rect(256);
        assert_eq!(img.pixel(x, y), [170, 170, 170, 255]);
    }
}
