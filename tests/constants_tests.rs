// Host-side tests for the front-end constants and canvas sizing helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod dom {
    include!("../src/dom.rs");
}

use constants::*;
use dom::{backing_size, clamp_dpr};

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(MIN_BACKING_PX >= 1);
    assert_eq!(QUAD_CORNERS, 4);
}

#[test]
fn gpu_layout_matches_engine_types() {
    assert_eq!(
        STAR_VERTEX_STRIDE as usize,
        std::mem::size_of::<starfield_core::StarVertex>()
    );
    // two column-major mat4s, then vec2 + f32 + pad, padded to 16 bytes
    assert_eq!(LAYER_UNIFORM_SIZE, 2 * 64 + 16);
    assert_eq!(LAYER_UNIFORM_SIZE % 16, 0);
}

#[test]
fn event_names_are_dom_names() {
    for name in [RESIZE_EVENT, POINTER_MOVE_EVENT, SCROLL_EVENT] {
        assert!(!name.is_empty());
        assert_eq!(name, name.to_ascii_lowercase());
    }
}

#[test]
fn dpr_is_clamped() {
    assert_eq!(clamp_dpr(0.5), 1.0);
    assert_eq!(clamp_dpr(1.5), 1.5);
    assert_eq!(clamp_dpr(3.0), MAX_DEVICE_PIXEL_RATIO);
    assert_eq!(clamp_dpr(f64::NAN), 1.0);
    assert_eq!(clamp_dpr(f64::INFINITY), 1.0);
}

#[test]
fn backing_size_scales_css_pixels() {
    assert_eq!(backing_size(800, 600, 1.0), (800, 600));
    assert_eq!(backing_size(800, 600, 2.0), (1600, 1200));
    assert_eq!(backing_size(800, 600, 4.0), (1600, 1200));
    assert_eq!(backing_size(333, 101, 1.5), (500, 152));
}

#[test]
fn backing_size_never_reaches_zero() {
    assert_eq!(backing_size(0, 0, 2.0), (1, 1));
    assert_eq!(backing_size(0, 10, 1.0), (1, 10));
}
