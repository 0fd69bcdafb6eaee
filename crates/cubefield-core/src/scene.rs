//! Per-frame stepping shared by every front-end.

use crate::camera::{CameraRig, PointerSource};
use crate::clock::AnimationClock;
use crate::config::SceneConfig;
use crate::deform::DeformationParams;
use crate::error::SceneError;
use crate::input::InputCommand;
use crate::instances::index_count;
use glam::{Mat4, Quat, Vec2, Vec3};

/// Everything a backend needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameParams {
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub orientation: Quat,
    /// Seconds since the first frame.
    pub time: f64,
    pub expand: f32,
    /// Final per-vertex scale including the preset's cube size.
    pub scale: f32,
    pub cube_size: f32,
    pub origin: Vec3,
    pub deformation: DeformationParams,
    pub index_count: u32,
}

pub struct Scene {
    config: SceneConfig,
    camera: CameraRig,
    clock: AnimationClock,
    viewport: (u32, u32),
    index_count: u32,
}

impl Scene {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Result<Self, SceneError> {
        config.validate()?;
        let index_count = index_count(&config.grid)?;
        log::debug!(
            "[scene] {} preset, {} cells, {} indices",
            config.preset,
            config.grid.cell_count(),
            index_count
        );
        Ok(Self {
            camera: CameraRig::new(config.camera.clone()),
            config,
            clock: AnimationClock::new(),
            viewport: (width.max(1), height.max(1)),
            index_count,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    pub fn apply(&mut self, command: InputCommand) {
        match command {
            InputCommand::PointerDown { source, x, y } => {
                self.camera.begin_drag(source, Vec2::new(x, y))
            }
            InputCommand::PointerMove { source, x, y } => {
                self.camera.drag_to(source, Vec2::new(x, y));
            }
            InputCommand::PointerUp { source } => self.camera.end_drag(source),
            InputCommand::Resize { width, height } => {
                self.viewport = (width.max(1), height.max(1));
            }
        }
    }

    /// Advances one frame: input, clock, drag goal, smoothing, deformation,
    /// then matrices.
    pub fn step(
        &mut self,
        raw_timestamp_ms: f64,
        commands: impl IntoIterator<Item = InputCommand>,
    ) -> FrameParams {
        for command in commands {
            self.apply(command);
        }
        let time = self.clock.tick(raw_timestamp_ms);
        self.camera.apply_drag();
        self.camera.update_smoothing();

        let deformation = self.config.deformation;
        let expand = deformation.expansion(time);
        let scale = deformation.scale(expand) * self.config.cube_size;

        let camera = self.camera.camera(self.aspect());
        FrameParams {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            eye: camera.eye,
            orientation: camera.orientation(),
            time,
            expand,
            scale,
            cube_size: self.config.cube_size,
            origin: self.config.origin,
            deformation,
            index_count: self.index_count,
        }
    }

    pub fn is_dragging_with(&self, source: PointerSource) -> bool {
        let drag = self.camera.drag();
        drag.dragging && drag.source == source
    }
}
