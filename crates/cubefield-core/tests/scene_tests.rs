use cubefield_core::{
    run_frame, DeformationParams, FrameParams, InputCommand, InputQueue, PointerSource,
    RenderBackend, Scene, SceneError, ScenePreset,
};

#[derive(Default)]
struct RecordingBackend {
    frames: Vec<FrameParams>,
    fail_at: Option<usize>,
}

impl RenderBackend for RecordingBackend {
    fn render(&mut self, frame: &FrameParams) -> Result<(), SceneError> {
        if self.fail_at == Some(self.frames.len()) {
            return Err(SceneError::ContextLost("test".into()));
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}

fn labels_scene() -> Scene {
    Scene::new(ScenePreset::Labels.config(None), 800, 600).unwrap()
}

#[test]
fn first_frame_is_time_zero() {
    let mut scene = labels_scene();
    let mut backend = RecordingBackend::default();
    let f = run_frame(&mut scene, &mut backend, 98_765.4, []).unwrap();
    assert_eq!(f.time, 0.0);
    assert_eq!(backend.frames.len(), 1);
    assert_eq!(f.index_count, 972);
}

#[test]
fn labels_scene_is_static_with_half_size_cubes() {
    let mut scene = labels_scene();
    for ms in [0.0, 500.0, 12_000.0] {
        let f = scene.step(ms, []);
        assert_eq!(f.expand, 1.0);
        assert_eq!(f.scale, 0.5);
        assert_eq!(f.deformation, DeformationParams::STATIC);
    }
}

#[test]
fn cubefield_scale_tracks_the_pulse() {
    let mut scene = Scene::new(ScenePreset::Cubefield.config(None), 800, 600).unwrap();
    scene.step(0.0, []);
    let f = scene.step(2_000.0, []);
    let d = DeformationParams::PULSE;
    let e = d.expansion(2.0);
    assert!((f.expand - e).abs() < 1e-5);
    assert!((f.scale - (1.0 + e / 40.0)).abs() < 1e-5);
    assert_eq!(f.index_count, 3375 * 36);
}

#[test]
fn queued_drag_reaches_the_camera_on_the_next_step() {
    let mut scene = labels_scene();
    let mut queue = InputQueue::default();
    queue.push(InputCommand::PointerDown {
        source: PointerSource::Mouse,
        x: 100.0,
        y: 100.0,
    });
    queue.push(InputCommand::PointerMove {
        source: PointerSource::Mouse,
        x: 150.0,
        y: 100.0,
    });
    // events only land when drained by the frame loop
    assert_eq!(scene.camera().angles().goal_azimuth, 45.0);
    scene.step(0.0, queue.drain());
    let a = scene.camera().angles();
    assert!((a.goal_azimuth - 35.0).abs() < 1e-5);
    assert!((a.current_azimuth - 44.0).abs() < 1e-5);
    assert!(scene.is_dragging_with(PointerSource::Mouse));
}

fn mouse_down(x: f32) -> InputCommand {
    InputCommand::PointerDown {
        source: PointerSource::Mouse,
        x,
        y: 0.0,
    }
}

fn mouse_move(x: f32) -> InputCommand {
    InputCommand::PointerMove {
        source: PointerSource::Mouse,
        x,
        y: 0.0,
    }
}

const MOUSE_UP: InputCommand = InputCommand::PointerUp {
    source: PointerSource::Mouse,
};

#[test]
fn press_move_release_in_one_frame_keeps_the_move() {
    let mut scene = labels_scene();
    scene.step(16.0, [mouse_down(0.0), mouse_move(100.0), MOUSE_UP]);
    assert!((scene.camera().angles().goal_azimuth - 25.0).abs() < 1e-5);
    assert!(!scene.is_dragging_with(PointerSource::Mouse));
}

#[test]
fn final_move_before_release_is_not_lost() {
    let mut scene = labels_scene();
    scene.step(0.0, [mouse_down(0.0), mouse_move(50.0)]);
    assert!((scene.camera().angles().goal_azimuth - 35.0).abs() < 1e-5);
    scene.step(16.0, [mouse_move(100.0), MOUSE_UP]);
    assert!((scene.camera().angles().goal_azimuth - 25.0).abs() < 1e-5);
    // idle frames leave the goal where the release put it
    scene.step(32.0, []);
    assert!((scene.camera().angles().goal_azimuth - 25.0).abs() < 1e-5);
}

#[test]
fn touch_release_does_not_end_mouse_drag() {
    let mut scene = labels_scene();
    scene.step(
        0.0,
        [
            InputCommand::PointerDown {
                source: PointerSource::Mouse,
                x: 0.0,
                y: 0.0,
            },
            InputCommand::PointerUp {
                source: PointerSource::Touch,
            },
        ],
    );
    assert!(scene.is_dragging_with(PointerSource::Mouse));
}

#[test]
fn resize_changes_projection_aspect() {
    let mut scene = labels_scene();
    let wide = scene.step(0.0, []);
    let square = scene.step(16.0, [InputCommand::Resize { width: 500, height: 500 }]);
    assert_eq!(scene.viewport(), (500, 500));
    assert!(square.projection.x_axis.x > wide.projection.x_axis.x);
    // zero-sized viewports never divide by zero
    let f = scene.step(32.0, [InputCommand::Resize { width: 0, height: 0 }]);
    assert!(f.projection.is_finite());
}

#[test]
fn context_loss_stops_the_loop() {
    let mut scene = labels_scene();
    let mut backend = RecordingBackend {
        fail_at: Some(3),
        ..Default::default()
    };
    let mut halted = None;
    for i in 0..10 {
        if let Err(e) = run_frame(&mut scene, &mut backend, i as f64 * 16.0, []) {
            halted = Some((i, e));
            break;
        }
    }
    let (frame, err) = halted.expect("loop should halt");
    assert_eq!(frame, 3);
    assert!(matches!(err, SceneError::ContextLost(_)));
    assert_eq!(backend.frames.len(), 3);
}

#[test]
fn invalid_configs_fail_before_the_loop() {
    let mut config = ScenePreset::Labels.config(None);
    config.camera.decay_divisor = 0.5;
    assert!(matches!(
        Scene::new(config, 10, 10),
        Err(SceneError::InvalidConfig(_))
    ));
    assert!(matches!(
        Scene::new(ScenePreset::Cubefield.config(Some(1626)), 10, 10),
        Err(SceneError::IndexOverflow { .. })
    ));
}

#[test]
fn at_rest_camera_does_not_drift() {
    let mut scene = labels_scene();
    let first = scene.step(0.0, []);
    for i in 1..100 {
        let f = scene.step(i as f64 * 16.0, []);
        assert!((f.eye - first.eye).length() < 1e-5);
    }
}
