//! Seams between the engine and whatever hosts it.
//!
//! The browser front-end implements these with a canvas, WebGPU and
//! `requestAnimationFrame`; tests implement them with counters.

use crate::error::{HostError, RenderError};
use crate::scene::{FrameView, Scene};
use crate::viewport::Viewport;

/// Host-level input the engine subscribes to while running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Resize,
    PointerMove,
    Scroll,
}

pub trait Renderer {
    /// Allocate GPU buffers for the scene's layers and transient points.
    fn upload(&mut self, scene: &Scene);
    fn resize(&mut self, viewport: Viewport);
    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), RenderError>;
    /// Free every GPU-side resource. Called exactly once per mount.
    fn release(&mut self);
}

pub trait Host {
    type Renderer: Renderer;
    /// Identifies one frame request; handed back to `Background::on_frame`.
    type FrameHandle: Copy + PartialEq;

    /// Size of the drawable surface, or `None` when there is nothing to draw into.
    fn surface_size(&self) -> Option<Viewport>;
    fn bind_renderer(&mut self, viewport: Viewport) -> Result<Self::Renderer, HostError>;
    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> Result<Self::FrameHandle, HostError>;
    fn cancel_frame(&mut self, handle: Self::FrameHandle);
    fn listen(&mut self, event: HostEvent) -> Result<(), HostError>;
    fn unlisten(&mut self, event: HostEvent);
}
