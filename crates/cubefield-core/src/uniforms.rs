//! GPU-facing uniform blocks. Field order matches the WGSL structs in
//! `shaders/`; every block is a multiple of 16 bytes.

use crate::deform::Evaluate;
use crate::scene::FrameParams;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub origin: [f32; 4],
    pub expand: f32,
    pub scale: f32,
    pub time: f32,
    /// 1.0 when the vertex shader evaluates the deformation itself.
    pub gpu_deform: f32,
    pub base_offset: f32,
    pub period: f32,
    pub odd_power: f32,
    pub amplitude: f32,
    pub rectify: f32,
    /// 0.0 means unit scale.
    pub scale_divisor: f32,
    pub cube_size: f32,
    pub _pad: f32,
}

impl SceneUniforms {
    pub fn from_frame(frame: &FrameParams) -> Self {
        let d = &frame.deformation;
        Self {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            origin: frame.origin.extend(1.0).to_array(),
            expand: frame.expand,
            scale: frame.scale,
            time: frame.time as f32,
            gpu_deform: flag(d.evaluate_on == Evaluate::Gpu),
            base_offset: d.base_offset,
            period: d.period,
            odd_power: d.odd_power as f32,
            amplitude: d.amplitude,
            rectify: flag(d.rectify),
            scale_divisor: d.scale_divisor.unwrap_or(0.0),
            cube_size: frame.cube_size,
            _pad: 0.0,
        }
    }
}

#[inline]
fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LabelUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub right: [f32; 4],
    pub up: [f32; 4],
    pub half_size: f32,
    /// Multiplies instance centres, so labels ride the same expansion as the cubes.
    pub expand: f32,
    pub _pad: [f32; 2],
}

impl LabelUniforms {
    pub fn from_frame(frame: &FrameParams, half_size: f32) -> Self {
        let view_proj: Mat4 = frame.projection * frame.view;
        let right = frame.orientation * glam::Vec3::X;
        let up = frame.orientation * glam::Vec3::Y;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
            half_size,
            expand: frame.expand,
            _pad: [0.0; 2],
        }
    }
}

/// One billboard: unexpanded cell centre (lattice + origin) and its layer
/// in the label texture array.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LabelInstance {
    pub center: [f32; 3],
    pub layer: u32,
}

#[cfg(feature = "gpu")]
impl LabelInstance {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Uint32,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LabelInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}
