use crate::camera::Camera;
use crate::host::Renderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// `None` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Keeps camera aspect and renderer size in step with the window.
#[derive(Clone, Debug)]
pub struct ViewportAdapter {
    current: Viewport,
    attached: bool,
}

impl ViewportAdapter {
    pub fn new(initial: Viewport) -> Self {
        Self {
            current: initial,
            attached: false,
        }
    }

    #[inline]
    pub fn current(&self) -> Viewport {
        self.current
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Apply a resize. Degenerate sizes and repeats of the current size are
    /// ignored; returns whether anything changed.
    pub fn apply<R: Renderer + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        camera: &mut Camera,
        renderer: &mut R,
    ) -> bool {
        let Some(next) = Viewport::new(width, height) else {
            log::debug!("[viewport] ignoring degenerate resize {}x{}", width, height);
            return false;
        };
        if next == self.current {
            return false;
        }
        self.current = next;
        camera.set_aspect(next);
        renderer.resize(next);
        true
    }
}
