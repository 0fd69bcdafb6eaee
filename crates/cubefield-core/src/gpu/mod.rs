//! wgpu renderer shared by the web and native front-ends.

mod context;
mod pipeline;
mod renderer;
mod targets;

pub use context::GpuBackend;
pub use pipeline::{compile_stage, link_pipeline};
pub use renderer::SceneRenderer;
pub use targets::{pick_surface_format, DepthTarget, DEPTH_FORMAT};
