use crate::error::SceneError;
use crate::input::InputCommand;
use crate::scene::{FrameParams, Scene};

/// Draws prepared frames. Implemented by the wgpu renderers and by test doubles.
pub trait RenderBackend {
    /// Upload uniforms, clear color and depth, issue the draw.
    ///
    /// Transient surface problems are handled inside and reported as `Ok`;
    /// an `Err` (normally `ContextLost`) stops the frame loop for good.
    fn render(&mut self, frame: &FrameParams) -> Result<(), SceneError>;
}

/// One full iteration of the frame loop: step the scene, then render.
pub fn run_frame<B: RenderBackend + ?Sized>(
    scene: &mut Scene,
    backend: &mut B,
    raw_timestamp_ms: f64,
    input: impl IntoIterator<Item = InputCommand>,
) -> Result<FrameParams, SceneError> {
    let frame = scene.step(raw_timestamp_ms, input);
    if let Err(e) = backend.render(&frame) {
        log::warn!("[scene] frame loop halted: {e}");
        return Err(e);
    }
    Ok(frame)
}
