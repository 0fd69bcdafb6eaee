pub mod backend;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod deform;
pub mod error;
pub mod input;
pub mod instances;
pub mod labels;
pub mod mesh;
pub mod scene;
pub mod shader;
pub mod uniforms;

#[cfg(feature = "gpu")]
pub mod gpu;

pub static CUBE_VERT_WGSL: &str = include_str!("../shaders/cube.vert.wgsl");
pub static CUBE_FRAG_WGSL: &str = include_str!("../shaders/cube.frag.wgsl");
pub static LABEL_VERT_WGSL: &str = include_str!("../shaders/label.vert.wgsl");
pub static LABEL_FRAG_WGSL: &str = include_str!("../shaders/label.frag.wgsl");

pub use backend::{run_frame, RenderBackend};
pub use camera::{CameraConfig, CameraRig, DragState, OrbitAngles, Placement, PointerSource};
pub use clock::AnimationClock;
pub use config::{parse_query, SceneConfig, ScenePreset};
pub use deform::{DeformationParams, Evaluate};
pub use error::SceneError;
pub use input::{InputCommand, InputQueue};
pub use instances::{build_instances, index_count, vertex_count, GridBounds, InstanceBuffers};
pub use labels::{Label, LabelImage, LabelRasterizer, PlateRasterizer, DEFAULT_LABELS};
pub use mesh::{cube_template, MeshTemplate, Vertex};
pub use scene::{FrameParams, Scene};
