use crate::constants::{MAX_DEVICE_PIXEL_RATIO, MIN_BACKING_PX};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// Look up a `<canvas>` by id. Any other element type counts as missing.
pub fn find_canvas(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

/// Window inner size in CSS pixels.
pub fn window_inner_size(window: &web::Window) -> Option<(u32, u32)> {
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some((css_px(w), css_px(h)))
}

pub fn device_pixel_ratio() -> f64 {
    web::window().map_or(1.0, |w| clamp_dpr(w.device_pixel_ratio()))
}

#[inline]
fn css_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round() as u32
    } else {
        0
    }
}

/// Clamp a reported device pixel ratio to `[1, MAX_DEVICE_PIXEL_RATIO]`.
#[inline]
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() {
        dpr.clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Canvas backing size for a CSS size at the given pixel ratio.
pub fn backing_size(css_width: u32, css_height: u32, dpr: f64) -> (u32, u32) {
    let dpr = clamp_dpr(dpr);
    let scale = |v: u32| ((v as f64 * dpr).round() as u32).max(MIN_BACKING_PX);
    (scale(css_width), scale(css_height))
}

pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    css_width: u32,
    css_height: u32,
) -> (u32, u32) {
    let (w, h) = backing_size(css_width, css_height, device_pixel_ratio());
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    (w, h)
}
