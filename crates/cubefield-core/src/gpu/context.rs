use super::renderer::SceneRenderer;
use super::targets::{pick_surface_format, DepthTarget};
use crate::backend::RenderBackend;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::labels::LabelRasterizer;
use crate::scene::FrameParams;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A configured surface plus the scene renderer drawing into it.
pub struct GpuBackend<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    renderer: SceneRenderer,
    lost: Arc<AtomicBool>,
}

impl<'w> GpuBackend<'w> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        scene: &SceneConfig,
        rasterizer: &mut dyn LabelRasterizer,
    ) -> Result<Self, SceneError> {
        let (width, height) = (width.max(1), height.max(1));
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| SceneError::BackendUnavailable("no compatible GPU adapter".into()))?;
        log::info!("[gpu] adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| SceneError::BackendUnavailable(format!("request_device error: {e:?}")))?;

        let lost = Arc::new(AtomicBool::new(false));
        let flag = lost.clone();
        device.set_device_lost_callback(move |reason, message| {
            log::error!("[gpu] device lost ({reason:?}): {message}");
            flag.store(true, Ordering::Release);
        });

        let caps = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&caps).ok_or_else(|| {
            SceneError::BackendUnavailable("surface reports no supported formats".into())
        })?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = SceneRenderer::new(&device, &queue, format, scene, rasterizer).await?;
        let depth = DepthTarget::new(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            renderer,
            lost,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, width, height);
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// `Ok(None)` means skip this frame.
    fn acquire_frame(&mut self) -> Result<Option<wgpu::SurfaceTexture>, SceneError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface outdated, reconfiguring");
                self.reconfigure();
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => Ok(None),
            Err(e) => Err(SceneError::ContextLost(format!("surface error: {e}"))),
        }
    }
}

impl RenderBackend for GpuBackend<'_> {
    fn render(&mut self, frame: &FrameParams) -> Result<(), SceneError> {
        if self.lost.load(Ordering::Acquire) {
            return Err(SceneError::ContextLost("device lost".into()));
        }
        let Some(surface_tex) = self.acquire_frame()? else {
            return Ok(());
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.prepare(&self.queue, frame);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.renderer
            .encode(&mut encoder, &view, &self.depth.view, frame);
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
