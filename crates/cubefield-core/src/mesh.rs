//! Unit cube template shared by every instance.
//!
//! 24 vertices (4 per face, so each face keeps its own normal) and 36
//! indices. The template is a `static` and never changes; the builder in
//! `instances` copies it once per grid cell.

use bytemuck::{Pod, Zeroable};

pub const FLOATS_PER_VERTEX: usize = 9;
pub const CUBE_VERTEX_COUNT: usize = 24;
pub const CUBE_INDEX_COUNT: usize = 36;

// Byte layout of `Vertex`; the WGSL `VertexIn` uses locations 0, 1, 2.
pub const VERTEX_STRIDE: u64 = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64;
pub const POSITION_OFFSET: u64 = 0;
pub const NORMAL_OFFSET: u64 = 12;
pub const INSTANCE_OFFSET_OFFSET: u64 = 24;

/// Interleaved vertex: position, normal, per-copy lattice offset.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub instance_offset: [f32; 3],
}

#[cfg(feature = "gpu")]
impl Vertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x3,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: VERTEX_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

pub struct MeshTemplate {
    pub vertices: [Vertex; CUBE_VERTEX_COUNT],
    pub indices: [u32; CUBE_INDEX_COUNT],
}

const fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex {
        position,
        normal,
        instance_offset: [0.0, 0.0, 0.0],
    }
}

const DOWN: [f32; 3] = [0.0, -1.0, 0.0];
const UP: [f32; 3] = [0.0, 1.0, 0.0];
const BACK: [f32; 3] = [0.0, 0.0, -1.0];
const RIGHT: [f32; 3] = [1.0, 0.0, 0.0];
const FRONT: [f32; 3] = [0.0, 0.0, 1.0];
const LEFT: [f32; 3] = [-1.0, 0.0, 0.0];

#[rustfmt::skip]
static CUBE: MeshTemplate = MeshTemplate {
    vertices: [
        // floor
        v([-0.5, -0.5, -0.5], DOWN),
        v([ 0.5, -0.5, -0.5], DOWN),
        v([ 0.5, -0.5,  0.5], DOWN),
        v([-0.5, -0.5,  0.5], DOWN),
        // roof
        v([-0.5,  0.5, -0.5], UP),
        v([ 0.5,  0.5, -0.5], UP),
        v([ 0.5,  0.5,  0.5], UP),
        v([-0.5,  0.5,  0.5], UP),
        // back wall (-z)
        v([-0.5, -0.5, -0.5], BACK),
        v([-0.5,  0.5, -0.5], BACK),
        v([ 0.5,  0.5, -0.5], BACK),
        v([ 0.5, -0.5, -0.5], BACK),
        // right wall (+x)
        v([ 0.5, -0.5, -0.5], RIGHT),
        v([ 0.5, -0.5,  0.5], RIGHT),
        v([ 0.5,  0.5,  0.5], RIGHT),
        v([ 0.5,  0.5, -0.5], RIGHT),
        // front wall (+z)
        v([-0.5,  0.5,  0.5], FRONT),
        v([ 0.5,  0.5,  0.5], FRONT),
        v([ 0.5, -0.5,  0.5], FRONT),
        v([-0.5, -0.5,  0.5], FRONT),
        // left wall (-x)
        v([-0.5, -0.5, -0.5], LEFT),
        v([-0.5, -0.5,  0.5], LEFT),
        v([-0.5,  0.5,  0.5], LEFT),
        v([-0.5,  0.5, -0.5], LEFT),
    ],
    indices: [
         0,  1,  3,    1,  2,  3,
         4,  5,  7,    5,  6,  7,
         8,  9, 11,    9, 10, 11,
        12, 13, 15,   13, 14, 15,
        16, 17, 19,   17, 18, 19,
        20, 21, 23,   21, 22, 23,
    ],
};

#[inline]
pub fn cube_template() -> &'static MeshTemplate {
    &CUBE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_nine_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), FLOATS_PER_VERTEX * 4);
        assert_eq!(VERTEX_STRIDE, 36);
        assert_eq!(
            std::mem::offset_of!(Vertex, normal) as u64,
            NORMAL_OFFSET
        );
        assert_eq!(
            std::mem::offset_of!(Vertex, instance_offset) as u64,
            INSTANCE_OFFSET_OFFSET
        );
    }

    #[test]
    fn every_vertex_lies_on_its_face_plane() {
        for vert in cube_template().vertices.iter() {
            let p = glam::Vec3::from(vert.position);
            let n = glam::Vec3::from(vert.normal);
            assert!((p.dot(n) - 0.5).abs() < 1e-6, "{vert:?} off its face");
            assert_eq!(vert.instance_offset, [0.0; 3]);
        }
    }

    #[test]
    fn faces_use_only_their_own_four_vertices() {
        let t = cube_template();
        for (face, tris) in t.indices.chunks(6).enumerate() {
            let lo = face as u32 * 4;
            assert!(tris.iter().all(|&i| (lo..lo + 4).contains(&i)));
        }
    }
}
