// Host-side doubles for the engine's host/renderer seams.
// Every call is appended to a shared journal so tests can assert ordering.

#![allow(dead_code)]

use fnv::FnvHashMap;
use starfield_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
pub struct Probe {
    pub journal: RefCell<Vec<String>>,
    pub renders: Cell<usize>,
    pub live_renderers: Cell<usize>,
    pub bound_renderers: Cell<usize>,
    pub resizes: RefCell<Vec<Viewport>>,
    pub uploaded_layers: RefCell<Vec<usize>>,
    pub last_frame_layers: Cell<usize>,
    pub last_transients: Cell<usize>,
}

impl Probe {
    pub fn note(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }
}

pub struct MockRenderer {
    probe: Rc<Probe>,
    released: bool,
}

impl Renderer for MockRenderer {
    fn upload(&mut self, scene: &Scene) {
        self.probe.note("upload");
        *self.probe.uploaded_layers.borrow_mut() = scene.layers().iter().map(|l| l.len()).collect();
    }

    fn resize(&mut self, viewport: Viewport) {
        assert!(!self.released, "resize after release");
        self.probe.note(format!("resize {}x{}", viewport.width, viewport.height));
        self.probe.resizes.borrow_mut().push(viewport);
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), RenderError> {
        assert!(!self.released, "render after release");
        self.probe.renders.set(self.probe.renders.get() + 1);
        self.probe.last_frame_layers.set(frame.layers.len());
        self.probe.last_transients.set(frame.transients.len());
        Ok(())
    }

    fn release(&mut self) {
        assert!(!self.released, "renderer released twice");
        self.released = true;
        self.probe.note("release");
        self.probe.live_renderers.set(self.probe.live_renderers.get() - 1);
    }
}

pub struct MockHost {
    pub probe: Rc<Probe>,
    pub surface: Option<Viewport>,
    pub fail_bind: bool,
    pub fail_schedule_after: Option<usize>,
    pub fail_listen: Option<HostEvent>,
    pub listeners: FnvHashMap<HostEvent, usize>,
    pending: Vec<u32>,
    next_handle: u32,
    scheduled: usize,
}

impl MockHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            probe: Rc::new(Probe::default()),
            surface: Viewport::new(width, height),
            fail_bind: false,
            fail_schedule_after: None,
            fail_listen: None,
            listeners: FnvHashMap::default(),
            pending: Vec::new(),
            next_handle: 1,
            scheduled: 0,
        }
    }

    pub fn headless() -> Self {
        let mut host = Self::new(1, 1);
        host.surface = None;
        host
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Hand every outstanding frame request to the caller, as the display would.
    pub fn take_pending(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.pending)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.values().sum()
    }
}

impl Host for MockHost {
    type Renderer = MockRenderer;
    type FrameHandle = u32;

    fn surface_size(&self) -> Option<Viewport> {
        self.surface
    }

    fn bind_renderer(&mut self, viewport: Viewport) -> Result<MockRenderer, HostError> {
        if self.fail_bind {
            return Err(HostError::Renderer("no adapter".into()));
        }
        self.probe.note(format!("bind {}x{}", viewport.width, viewport.height));
        self.probe.live_renderers.set(self.probe.live_renderers.get() + 1);
        self.probe.bound_renderers.set(self.probe.bound_renderers.get() + 1);
        Ok(MockRenderer {
            probe: self.probe.clone(),
            released: false,
        })
    }

    fn request_frame(&mut self) -> Result<u32, HostError> {
        if self.fail_schedule_after.is_some_and(|n| self.scheduled >= n) {
            return Err(HostError::Schedule("refresh callback refused".into()));
        }
        self.scheduled += 1;
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pending.push(handle);
        self.probe.note("request");
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.pending.retain(|h| *h != handle);
        self.probe.note("cancel");
    }

    fn listen(&mut self, event: HostEvent) -> Result<(), HostError> {
        if self.fail_listen == Some(event) {
            return Err(HostError::Listen(format!("{:?}", event)));
        }
        *self.listeners.entry(event).or_insert(0) += 1;
        self.probe.note(format!("listen {:?}", event));
        Ok(())
    }

    fn unlisten(&mut self, event: HostEvent) {
        if let Some(n) = self.listeners.get_mut(&event) {
            *n -= 1;
            if *n == 0 {
                self.listeners.remove(&event);
            }
        }
        self.probe.note(format!("unlisten {:?}", event));
    }
}

/// Fire every outstanding frame request once; returns how many fired.
pub fn pump(bg: &mut Background<MockHost>, timestamp_ms: f64) -> usize {
    let fired = bg.host_mut().take_pending();
    for &handle in &fired {
        bg.on_frame(handle, timestamp_ms);
    }
    fired.len()
}

/// Run `frames` refreshes 16 ms apart starting at `start_ms`.
pub fn run_frames(bg: &mut Background<MockHost>, start_ms: f64, frames: usize) {
    for i in 0..frames {
        pump(bg, start_ms + i as f64 * 16.0);
    }
}

pub fn layered() -> BackgroundConfig {
    BackgroundConfig::preset(Preset::Layered)
}

pub fn small_config() -> BackgroundConfig {
    let mut cfg = layered();
    for layer in &mut cfg.layers {
        layer.count = 16;
    }
    cfg
}
