// Scene tuning shared by the web and native front-ends.

// Labelled grid
pub const LABELS_GRID_SIDE: u32 = 3;
pub const LABELS_CUBE_SIZE: f32 = 0.5; // cubes leave room for the label quads
pub const LABELS_CAMERA_RADIUS: f32 = 4.0;
pub const LABELS_SENSITIVITY: f32 = 0.2; // degrees per pixel
pub const LABELS_DECAY_DIVISOR: f32 = 10.0;
pub const LABELS_ELEVATION_CLAMP: (f32, f32) = (45.0, 135.0);
pub const LABELS_INITIAL_AZIMUTH: f32 = 45.0;
pub const LABELS_INITIAL_ELEVATION: f32 = 45.0;
pub const LABELS_FOV_Y_DEG: f32 = 75.0;
pub const LABELS_Z_NEAR: f32 = 0.1;
pub const LABELS_Z_FAR: f32 = 1000.0;
pub const LABEL_QUAD_SIZE: f32 = 2.0;
pub const LABEL_TEXTURE_SIZE: u32 = 256;

// Cubefield
pub const CUBEFIELD_GRID_SIDE: u32 = 15;
pub const CUBEFIELD_SENSITIVITY: f32 = 1.0;
pub const CUBEFIELD_DECAY_DIVISOR: f32 = 50.0;
pub const CUBEFIELD_INITIAL_AZIMUTH: f32 = 30.0;
pub const CUBEFIELD_DISTANCE_PER_CELL: f32 = 7.0; // orbit radius = side * this
pub const CUBEFIELD_HEIGHT_RATIO: f32 = 0.685;
pub const CUBEFIELD_FOV_Y_DEG: f32 = 45.0;
pub const CUBEFIELD_Z_NEAR: f32 = 1.0;
pub const CUBEFIELD_Z_FAR: f32 = 4000.0;

// Wave: same lattice, folded through the origin, camera much closer
pub const WAVE_DISTANCE_PER_CELL: f32 = 2.0;

// Input
pub const INPUT_QUEUE_CAPACITY: usize = 64;

// Clear colors (linear RGBA)
pub const CUBEFIELD_CLEAR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
pub const LABELS_CLEAR: [f64; 4] = [0.02, 0.02, 0.04, 1.0];
