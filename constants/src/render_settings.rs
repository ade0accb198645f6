/// Initial camera placement.
pub const CAMERA_START: [f32; 3] = [15.0, 15.0, 15.0];
pub const CAMERA_MIN_DISTANCE: f32 = 3.0;
pub const CAMERA_MAX_DISTANCE: f32 = 250.0;

/// Offset from a selected pallet to where the camera settles.
pub const FOCUS_OFFSET: [f32; 3] = [0.0, 3.0, 5.0];

/// Per-frame lerp factor used when gliding towards a selected pallet.
pub const FOCUS_LERP: f32 = 0.1;

/// Pointer press and release closer than this (normalised device coordinates) count as a click.
pub const CLICK_TOLERANCE_NDC: f32 = 0.01;

pub const FLOOR_SIZE: f32 = 100.0;
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Tube radius of torus primitives.
pub const TORUS_TUBE_RADIUS: f32 = 0.4;

/// Pallet mesh: top planks and three support beams.
pub const PALLET_TOP_PLANKS: usize = 5;
pub const PALLET_PLANK_HEIGHT: f32 = 0.1;
pub const PALLET_PLANK_GAP: f32 = 0.05;
pub const PALLET_SUPPORT_DEPTH: f32 = 0.2;
