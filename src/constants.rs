// Browser-side tuning for the starfield front-end.
// Engine tuning (camera, spin, meteors) lives in `starfield_core::constants`.

// Canvas backing store
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0; // caps fill cost on dense displays
pub const MIN_BACKING_PX: u32 = 1;

// Window events the engine subscribes to
pub const RESIZE_EVENT: &str = "resize";
pub const POINTER_MOVE_EVENT: &str = "pointermove";
pub const SCROLL_EVENT: &str = "scroll";

// GPU layout
pub const STAR_VERTEX_STRIDE: u64 = 32; // position(12) + size(4) + color(16)
pub const LAYER_UNIFORM_SIZE: u64 = 144; // 2 x mat4 + resolution + opacity + pad
pub const QUAD_CORNERS: u32 = 4;
