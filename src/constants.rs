/// Frontend tuning constants: DOM ids, colors, audio and lighting.
///
/// Scene layout and camera motion defaults live in `orbit_core::constants`;
/// these only concern how the browser side looks and sounds.
// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const HINT_OVERLAY_ID: &str = "hint-overlay";
pub const OVERLAY_OK_ID: &str = "overlay-ok";
pub const OVERLAY_CLOSE_ID: &str = "overlay-close";

// Hover highlight tints
pub const PLANET_HIGHLIGHT: [f32; 3] = [0.2, 0.75, 1.0];
pub const MOON_HIGHLIGHT: [f32; 3] = [1.0, 0.8, 0.25];
pub const HIGHLIGHT_GLOW_SCALE: f32 = 1.35; // glow halo radius relative to sphere
pub const HIGHLIGHT_GLOW_STRENGTH: f32 = 0.8;

// Lighting
pub const LIGHT_DIRECTION: [f32; 3] = [0.0, 1.0, 0.0]; // hemispheric "sky" direction
pub const LIGHT_INTENSITY: f32 = 0.7;

// Sky / clear
pub const CLEAR_COLOR: [f64; 3] = [0.01, 0.015, 0.04];

// Particles
pub const PARTICLE_COLOR: [f32; 3] = [0.55, 0.8, 1.0];
pub const PARTICLE_SEED: u64 = 42;

// Audio
pub const TRACK_URL: &str = "assets/track.mp3";
pub const ANALYSER_FFT_SIZE: u32 = 256;
pub const ANALYSER_SMOOTHING: f64 = 0.8;
pub const TRACK_GAIN: f32 = 0.8;

// Renderer limits (must match the WGSL array sizes)
pub const MAX_SPHERES: usize = 8;
