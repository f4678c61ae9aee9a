use crate::viewport::Viewport;
use glam::Vec2;

/// Most recent pointer and scroll input. Each field is overwritten by its
/// event and read once per tick; nothing is queued.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    /// Normalized device coordinates, y up.
    pub pointer: Vec2,
    pub scroll_y: f32,
}

impl InputState {
    pub fn record_pointer(&mut self, x_px: f32, y_px: f32, viewport: Viewport) {
        if let Some(ndc) = pointer_ndc(x_px, y_px, viewport) {
            self.pointer = ndc;
        }
    }

    pub fn record_scroll(&mut self, scroll_y: f32) {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
    }
}

/// Map a pixel position to `[-1, 1]` on both axes with +y pointing up.
#[inline]
pub fn pointer_ndc(x_px: f32, y_px: f32, viewport: Viewport) -> Option<Vec2> {
    if !(x_px.is_finite() && y_px.is_finite()) {
        return None;
    }
    let w = viewport.width as f32;
    let h = viewport.height as f32;
    let x = (x_px / w) * 2.0 - 1.0;
    let y = -(y_px / h) * 2.0 + 1.0;
    Some(Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)))
}
