use std::sync::Arc;

use clap::{Parser, ValueEnum};
use cubefield_core::gpu::GpuBackend;
use cubefield_core::{
    run_frame, InputCommand, InputQueue, PlateRasterizer, PointerSource, Scene, ScenePreset,
};
use instant::Instant;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Event, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Pulsing lattice seen from a turntable camera.
    Cubefield,
    /// Small labelled grid with a free orbit camera.
    Labels,
    /// Lattice folding through the origin, deformed on the GPU.
    Wave,
}

impl From<Mode> for ScenePreset {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Cubefield => ScenePreset::Cubefield,
            Mode::Labels => ScenePreset::Labels,
            Mode::Wave => ScenePreset::Wave,
        }
    }
}

#[derive(Parser)]
#[command(name = "cubefield")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scene to show.
    #[arg(short, long, value_enum, default_value_t = Mode::Cubefield)]
    mode: Mode,

    /// Cubes per grid side (defaults to the scene's own).
    #[arg(short, long)]
    size: Option<u32>,
}

/// Mouse and first-touch tracking between winit events.
#[derive(Default)]
struct PointerTracker {
    cursor: (f32, f32),
    touch_id: Option<u64>,
}

impl PointerTracker {
    fn translate(&mut self, event: &WindowEvent, scale_factor: f64) -> Option<InputCommand> {
        let logical = |p: &PhysicalPosition<f64>| {
            let l = p.to_logical::<f32>(scale_factor);
            (l.x, l.y)
        };
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = logical(position);
                Some(InputCommand::PointerMove {
                    source: PointerSource::Mouse,
                    x: self.cursor.0,
                    y: self.cursor.1,
                })
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => InputCommand::PointerDown {
                    source: PointerSource::Mouse,
                    x: self.cursor.0,
                    y: self.cursor.1,
                },
                ElementState::Released => InputCommand::PointerUp {
                    source: PointerSource::Mouse,
                },
            }),
            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => {
                let (x, y) = logical(location);
                match phase {
                    TouchPhase::Started if self.touch_id.is_none() => {
                        self.touch_id = Some(*id);
                        Some(InputCommand::PointerDown {
                            source: PointerSource::Touch,
                            x,
                            y,
                        })
                    }
                    TouchPhase::Moved if self.touch_id == Some(*id) => {
                        Some(InputCommand::PointerMove {
                            source: PointerSource::Touch,
                            x,
                            y,
                        })
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled if self.touch_id == Some(*id) => {
                        self.touch_id = None;
                        Some(InputCommand::PointerUp {
                            source: PointerSource::Touch,
                        })
                    }
                    _ => None,
                }
            }
            WindowEvent::Resized(size) => Some(InputCommand::Resize {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}

async fn create_backend(
    window: Arc<Window>,
    scene: &Scene,
) -> Result<GpuBackend<'static>, cubefield_core::SceneError> {
    let size = window.inner_size();
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window).map_err(|e| {
        cubefield_core::SceneError::BackendUnavailable(format!("create_surface: {e}"))
    })?;
    GpuBackend::new(
        &instance,
        surface,
        size.width,
        size.height,
        scene.config(),
        &mut PlateRasterizer,
    )
    .await
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let cli = Cli::parse();
    let preset = ScenePreset::from(cli.mode);
    let config = preset.config(cli.size);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("cubefield ({preset})"))
            .build(&event_loop)?,
    );
    let size = window.inner_size();
    let mut scene = Scene::new(config, size.width, size.height)?;
    let mut backend = pollster::block_on(create_backend(window.clone(), &scene))?;
    log::info!("[native] {} cells, mode {preset}", scene.config().grid.cell_count());

    let mut queue = InputQueue::default();
    let mut pointers = PointerTracker::default();
    let start = Instant::now();

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent { event, .. } => {
            if let Some(command) = pointers.translate(&event, window.scale_factor()) {
                if let InputCommand::Resize { width, height } = command {
                    backend.resize(width, height);
                }
                queue.push(command);
            }
        }
        Event::AboutToWait => {
            let ms = start.elapsed().as_secs_f64() * 1000.0;
            if let Err(e) = run_frame(&mut scene, &mut backend, ms, queue.drain()) {
                log::error!("[native] {e}");
                elwt.exit();
            }
        }
        _ => {}
    })?;
    Ok(())
}
