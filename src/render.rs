use cubefield_core::gpu::GpuBackend;
use cubefield_core::{LabelRasterizer, SceneConfig, SceneError};
use web_sys as web;

/// WebGPU surface on `canvas` with the scene renderer attached.
pub async fn create_backend(
    canvas: &web::HtmlCanvasElement,
    config: &SceneConfig,
    rasterizer: &mut dyn LabelRasterizer,
) -> Result<GpuBackend<'static>, SceneError> {
    let instance = wgpu::Instance::default();
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| SceneError::BackendUnavailable(format!("create_surface: {e}")))?;
    GpuBackend::new(
        &instance,
        surface,
        canvas.width(),
        canvas.height(),
        config,
        rasterizer,
    )
    .await
}
