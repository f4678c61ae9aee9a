//! Browser implementation of the engine's `Host` seam.
//!
//! Callbacks registered with the window hold only a `Weak` reference to the
//! engine, so a dropped `StarfieldHandle` can never be revived by a late
//! event. Every closure lives in this struct until it is unregistered.

use crate::constants::{POINTER_MOVE_EVENT, RESIZE_EVENT, SCROLL_EVENT};
use crate::render::{GpuContext, StarRenderer};
use crate::{dom, input};
use fnv::FnvHashMap;
use starfield_core::{Background, Host, HostError, HostEvent, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Engine = Rc<RefCell<Background<WebHost>>>;
type WeakEngine = Weak<RefCell<Background<WebHost>>>;

pub struct WebHost {
    window: web::Window,
    canvas: web::HtmlCanvasElement,
    gpu: Option<Rc<GpuContext>>,
    engine: WeakEngine,
    frame_cb: Option<Closure<dyn FnMut(f64)>>,
    /// Id of the animation frame request that has not fired or been cancelled.
    outstanding: Rc<Cell<Option<i32>>>,
    listeners: FnvHashMap<HostEvent, Closure<dyn FnMut(web::Event)>>,
}

impl WebHost {
    pub fn new(
        window: web::Window,
        canvas: web::HtmlCanvasElement,
        gpu: Option<GpuContext>,
    ) -> Self {
        Self {
            window,
            canvas,
            gpu: gpu.map(Rc::new),
            engine: Weak::new(),
            frame_cb: None,
            outstanding: Rc::new(Cell::new(None)),
            listeners: FnvHashMap::default(),
        }
    }

    /// Point callbacks at the engine that owns this host. Must happen before mount.
    pub fn attach(&mut self, engine: WeakEngine) {
        self.engine = engine;
        self.frame_cb = None;
    }

    fn event_handler(&self, event: HostEvent) -> Box<dyn FnMut(web::Event)> {
        let engine = self.engine.clone();
        let window = self.window.clone();
        match event {
            HostEvent::Resize => Box::new(move |_| {
                if let Some((w, h)) = dom::window_inner_size(&window) {
                    with_engine(&engine, |bg| bg.on_resize(w, h));
                }
            }),
            HostEvent::PointerMove => Box::new(move |ev| {
                if let Some((x, y)) = input::client_position(&ev) {
                    with_engine(&engine, |bg| bg.on_pointer_move(x, y));
                }
            }),
            HostEvent::Scroll => Box::new(move |_| {
                let y = input::scroll_offset(&window);
                with_engine(&engine, |bg| bg.on_scroll(y));
            }),
        }
    }
}

pub fn event_name(event: HostEvent) -> &'static str {
    match event {
        HostEvent::Resize => RESIZE_EVENT,
        HostEvent::PointerMove => POINTER_MOVE_EVENT,
        HostEvent::Scroll => SCROLL_EVENT,
    }
}

/// Run `f` against the engine if it is still alive and not already borrowed.
fn with_engine(engine: &WeakEngine, f: impl FnOnce(&mut Background<WebHost>)) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    match engine.try_borrow_mut() {
        Ok(mut bg) => f(&mut bg),
        Err(_) => log::debug!("[starfield] engine busy, dropping callback"),
    }
}

impl Host for WebHost {
    type Renderer = StarRenderer;
    type FrameHandle = i32;

    fn surface_size(&self) -> Option<Viewport> {
        if !self.canvas.is_connected() {
            return None;
        }
        let (w, h) = dom::window_inner_size(&self.window)?;
        Viewport::new(w, h)
    }

    fn bind_renderer(&mut self, viewport: Viewport) -> Result<StarRenderer, HostError> {
        let gpu = self
            .gpu
            .clone()
            .ok_or_else(|| HostError::Renderer("WebGPU unavailable".into()))?;
        Ok(StarRenderer::new(gpu, viewport))
    }

    fn request_frame(&mut self) -> Result<i32, HostError> {
        let engine = self.engine.clone();
        let outstanding = self.outstanding.clone();
        let cb = self.frame_cb.get_or_insert_with(|| {
            Closure::wrap(Box::new(move |ts: f64| {
                if let Some(handle) = outstanding.take() {
                    with_engine(&engine, |bg| bg.on_frame(handle, ts));
                }
            }) as Box<dyn FnMut(f64)>)
        });
        let handle = self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| HostError::Schedule(format!("{:?}", e)))?;
        self.outstanding.set(Some(handle));
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: i32) {
        if self.outstanding.get() == Some(handle) {
            self.outstanding.set(None);
        }
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("[starfield] cancelAnimationFrame failed: {:?}", e);
        }
    }

    fn listen(&mut self, event: HostEvent) -> Result<(), HostError> {
        if self.listeners.contains_key(&event) {
            return Ok(());
        }
        let closure = Closure::wrap(self.event_handler(event));
        self.window
            .add_event_listener_with_callback(event_name(event), closure.as_ref().unchecked_ref())
            .map_err(|e| HostError::Listen(format!("{}: {:?}", event_name(event), e)))?;
        self.listeners.insert(event, closure);
        Ok(())
    }

    fn unlisten(&mut self, event: HostEvent) {
        let Some(closure) = self.listeners.remove(&event) else {
            return;
        };
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(event_name(event), closure.as_ref().unchecked_ref())
        {
            log::warn!("[starfield] removing {} listener failed: {:?}", event_name(event), e);
        }
    }
}
