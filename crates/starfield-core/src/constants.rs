//! Tuning constants for the starfield engine.
//!
//! Per-page variation lives in `BackgroundConfig`; these are the shared
//! defaults the presets are assembled from.
// Camera projection
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;
pub const DEFAULT_CAMERA_Z: f32 = 10.0;

// Field extent: each axis is drawn from [-R, R]
pub const DEFAULT_FIELD_RADIUS: f32 = 1000.0;
// Layered bands sit up to 300 units deeper, so they draw from a smaller cube
// to keep the back band inside the far plane
pub const LAYERED_FIELD_RADIUS: f32 = 600.0;

// Camera parallax
pub const CAMERA_DAMPING: f32 = 0.02; // eye += (target - eye) * damping
pub const POINTER_PARALLAX: f32 = 2.0; // world units at full pointer deflection
pub const SCROLL_PARALLAX: f32 = 0.01; // world units per scrolled pixel

// Per-tick layer rotation (radians)
pub const BASE_SPIN_X: f32 = 0.0005;
pub const BASE_SPIN_Y: f32 = 0.001;
pub const POINTER_SPIN_X: f32 = 0.0003;
pub const POINTER_SPIN_Y: f32 = 0.0005;

// Vertical drift of the whole layer
pub const DRIFT_AMPLITUDE: f32 = 0.5;
pub const DRIFT_FREQUENCY_PER_MS: f64 = 0.0005;

// Star sizing
pub const STAR_BASE_SIZE: f32 = 0.5;
pub const STAR_SIZE_JITTER: f32 = 2.0;
pub const STAR_OPACITY: f32 = 0.9;

// Meteors (shooting stars)
pub const METEOR_SPAWN_INTERVAL_MS: f64 = 500.0;
pub const METEOR_MIN_LIFETIME_MS: f64 = 1000.0;
pub const METEOR_MAX_LIFETIME_MS: f64 = 3000.0;
pub const METEOR_FALL_STEP: f32 = 0.05; // per tick, scaled by age/lifetime
pub const METEOR_SPREAD: f32 = 6.0; // spawn x/y drawn from [-spread, spread]
pub const METEOR_SIZE: f32 = 0.1;
pub const METEOR_CAPACITY: usize = 8;

// Missed spawns older than this many intervals are dropped, not replayed
pub const METEOR_MAX_CATCH_UP: f64 = 4.0;
