/// Renderer, audio graph and page wiring constants for the web front-end.
///
/// Orbit and sampling behavior lives in `core::constants`; everything here
/// only shapes how the scene is drawn and how the browser is wired.
// Page elements and assets
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "video";
pub const PROMPT_ID: &str = "start-prompt";
pub const AUDIO_URL: &str = "bangarang.mp3";

// Audio analysis graph
pub const ANALYSER_FFT_SIZE: u32 = 2048;
pub const BANDPASS_FREQUENCY_HZ: f32 = 200.0;
pub const BANDPASS_Q: f32 = 1.0;
pub const BANDPASS_GAIN_DB: f32 = 6.0;

// Subject geometry (width, height, depth before scaling)
pub const BOX_SIZE: [f32; 3] = [9.0, 16.0, 9.0];
pub const BOX_FALLBACK_RGBA: [u8; 4] = [0x00, 0xff, 0x00, 0xff]; // shown until video frames arrive

// Ground grid helper
pub const GRID_SIZE: f32 = 100.0;
pub const GRID_DIVISIONS: u32 = 100;
// sRGB-encoded; the scene pass writes linear values
pub const GRID_COLOR: [f32; 3] = [0xfc as f32 / 255.0, 0x03 as f32 / 255.0, 0xe8 as f32 / 255.0];

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.35;
pub const BLOOM_STRENGTH: f32 = 0.4;
pub const BLOOM_RADIUS: f32 = 1.0;

pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
