use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position in CSS pixels relative to the viewport, for any event
/// that carries one (pointer and mouse events).
#[inline]
pub fn client_position(ev: &web::Event) -> Option<(f32, f32)> {
    let ev = ev.dyn_ref::<web::MouseEvent>()?;
    Some((ev.client_x() as f32, ev.client_y() as f32))
}

/// Current vertical scroll offset in CSS pixels; zero when unavailable.
#[inline]
pub fn scroll_offset(window: &web::Window) -> f32 {
    window
        .scroll_y()
        .ok()
        .filter(|y| y.is_finite())
        .map_or(0.0, |y| y as f32)
}
