/// Orbit, sampling and scene-layout tuning constants.
///
/// Times are in milliseconds, matching the animation-frame clock. Angular
/// speeds are radians per elapsed millisecond.
// Orbit radius alternation
pub const ORBIT_INITIAL_RADIUS: f32 = 15.0;
pub const ORBIT_RADIUS_DELTA: f32 = 15.0; // magnitude covered by one leg
pub const ORBIT_RADIUS_LEG_MS: f64 = 1500.0;

// Opening sequence (camera drops and orbit slows down)
pub const ORBIT_INITIAL_ANGULAR_SPEED: f32 = 0.0033;
pub const ORBIT_FINAL_ANGULAR_SPEED: f32 = 0.0003;
pub const CAMERA_INITIAL_HEIGHT: f32 = 60.0;
pub const CAMERA_FINAL_HEIGHT: f32 = 17.0;
pub const OPENING_DURATION_MS: f64 = 4000.0;

// Subject placement
pub const BOX_POSITION: [f32; 3] = [0.0, 9.0, 0.0];

// Volume sampling
pub const SAMPLE_INTERVAL_MS: i32 = 100;
pub const SCALE_TWEEN_MS: f64 = 100.0;
pub const SCALE_BASE: f32 = 5.0; // multiplier applied to normalized loudness
pub const SCALE_FLOOR: f32 = 0.1; // loudness offset so silence never collapses the box
pub const SPECTRUM_MAX: f32 = 255.0;

// Camera projection
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
