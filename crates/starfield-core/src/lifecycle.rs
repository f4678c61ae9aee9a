//! Mount/unmount state machine tying the engine to a page visit.
//!
//! ```text
//! Unmounted -> Mounting -> Running -> Unmounting -> Unmounted
//! ```
//!
//! Teardown order is fixed: stop the driver, drop the resize subscription,
//! drop pointer/scroll subscriptions, then release the renderer. Releasing
//! GPU resources while a frame can still fire is never possible.

use crate::config::BackgroundConfig;
use crate::driver::{step_scene, AnimationDriver};
use crate::error::{ConfigError, HostError, LifecycleError};
use crate::host::{Host, HostEvent, Renderer};
use crate::input::InputState;
use crate::particles::generate_field;
use crate::scene::{Scene, SceneBuilder};
use crate::viewport::{Viewport, ViewportAdapter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    Mounting,
    Running,
    Unmounting,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Unmounted => "unmounted",
            LifecycleState::Mounting => "mounting",
            LifecycleState::Running => "running",
            LifecycleState::Unmounting => "unmounting",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountOutcome {
    Running,
    /// No surface or no renderer; the page carries on without a background.
    Skipped,
}

pub struct Background<H: Host> {
    host: H,
    config: BackgroundConfig,
    state: LifecycleState,
    input: InputState,
    driver: AnimationDriver<H::FrameHandle>,
    viewport: Option<ViewportAdapter>,
    scene: Option<Scene>,
    renderer: Option<H::Renderer>,
    listening: SmallVec<[HostEvent; 2]>,
    rng: StdRng,
}

impl<H: Host> Background<H> {
    pub fn new(host: H, config: BackgroundConfig) -> Result<Self, ConfigError> {
        Self::with_rng(host, config, StdRng::from_entropy())
    }

    /// Same as `new` but with reproducible particle placement.
    pub fn with_seed(host: H, config: BackgroundConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(host, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(host: H, config: BackgroundConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            host,
            config,
            state: LifecycleState::Unmounted,
            input: InputState::default(),
            driver: AnimationDriver::default(),
            viewport: None,
            scene: None,
            renderer: None,
            listening: SmallVec::new(),
            rng,
        })
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport.as_ref().map(|v| v.current())
    }

    /// Ticks rendered during the current mount.
    pub fn ticks(&self) -> u64 {
        self.driver.ticks()
    }

    /// Events currently subscribed through the host, resize included.
    pub fn subscriptions(&self) -> SmallVec<[HostEvent; 3]> {
        let mut events = SmallVec::new();
        if self.viewport.as_ref().is_some_and(|v| v.is_attached()) {
            events.push(HostEvent::Resize);
        }
        events.extend(self.listening.iter().copied());
        events
    }

    pub fn mount(&mut self) -> Result<MountOutcome, LifecycleError> {
        if self.state != LifecycleState::Unmounted {
            return Err(LifecycleError::AlreadyMounted(self.state));
        }
        let Some(viewport) = self.host.surface_size() else {
            log::debug!("[starfield] no renderable surface, skipping background");
            return Ok(MountOutcome::Skipped);
        };
        self.state = LifecycleState::Mounting;

        let renderer = match self.host.bind_renderer(viewport) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("[starfield] renderer unavailable, skipping background: {}", e);
                self.state = LifecycleState::Unmounted;
                return Ok(MountOutcome::Skipped);
            }
        };
        self.build_scene(viewport, renderer);

        if let Err(e) = self.start_running() {
            log::error!("[starfield] mount failed: {}", e);
            self.teardown();
            return Err(e.into());
        }
        self.state = LifecycleState::Running;
        log::info!(
            "[starfield] mounted {} layers, {} particles at {}x{}",
            self.config.layers.len(),
            self.config.particle_count(),
            viewport.width,
            viewport.height
        );
        Ok(MountOutcome::Running)
    }

    fn build_scene(&mut self, viewport: Viewport, mut renderer: H::Renderer) {
        let mut scene = SceneBuilder::new(&self.config, viewport).build();
        for layer in generate_field(&self.config.layers, self.config.radius, &mut self.rng) {
            scene.add_layer(layer);
        }
        renderer.upload(&scene);
        self.scene = Some(scene);
        self.renderer = Some(renderer);
        self.viewport = Some(ViewportAdapter::new(viewport));
    }

    fn start_running(&mut self) -> Result<(), HostError> {
        self.driver.start(&mut self.host)?;

        self.host.listen(HostEvent::Resize)?;
        if let Some(adapter) = self.viewport.as_mut() {
            adapter.set_attached(true);
        }

        let mut wanted: SmallVec<[HostEvent; 2]> = SmallVec::new();
        if self.config.wants_pointer() {
            wanted.push(HostEvent::PointerMove);
        }
        if self.config.wants_scroll() {
            wanted.push(HostEvent::Scroll);
        }
        for event in wanted {
            self.host.listen(event)?;
            self.listening.push(event);
        }
        Ok(())
    }

    /// Tear everything down. Returns `false` if there was nothing mounted.
    pub fn unmount(&mut self) -> bool {
        match self.state {
            LifecycleState::Unmounted | LifecycleState::Unmounting => false,
            LifecycleState::Mounting | LifecycleState::Running => {
                self.teardown();
                log::info!("[starfield] unmounted");
                true
            }
        }
    }

    fn teardown(&mut self) {
        self.state = LifecycleState::Unmounting;

        self.driver.stop(&mut self.host);

        if let Some(adapter) = self.viewport.as_mut() {
            if adapter.is_attached() {
                self.host.unlisten(HostEvent::Resize);
                adapter.set_attached(false);
            }
        }
        for event in self.listening.drain(..) {
            self.host.unlisten(event);
        }

        if let Some(mut renderer) = self.renderer.take() {
            renderer.release();
        }
        self.scene = None;
        self.viewport = None;
        self.input = InputState::default();
        self.state = LifecycleState::Unmounted;
    }

    /// Display-refresh callback for the request identified by `handle`.
    pub fn on_frame(&mut self, handle: H::FrameHandle, timestamp_ms: f64) {
        if !self.driver.begin_frame(handle) || self.state != LifecycleState::Running {
            return;
        }
        let (Some(scene), Some(renderer), Some(adapter)) = (
            self.scene.as_mut(),
            self.renderer.as_mut(),
            self.viewport.as_ref(),
        ) else {
            return;
        };

        step_scene(scene, self.input, &self.config, timestamp_ms, &mut self.rng);
        if let Err(e) = renderer.render(&scene.frame(adapter.current())) {
            log::warn!("[starfield] render error: {}", e);
        }
        self.driver.finish_frame();

        if let Err(e) = self.driver.reschedule(&mut self.host) {
            log::error!("[starfield] cannot schedule next frame: {}", e);
            self.unmount();
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.state != LifecycleState::Running {
            return;
        }
        if let (Some(adapter), Some(scene), Some(renderer)) = (
            self.viewport.as_mut(),
            self.scene.as_mut(),
            self.renderer.as_mut(),
        ) {
            adapter.apply(width, height, &mut scene.camera, renderer);
        }
    }

    pub fn on_pointer_move(&mut self, x_px: f32, y_px: f32) {
        if self.state != LifecycleState::Running {
            return;
        }
        if let Some(viewport) = self.viewport() {
            self.input.record_pointer(x_px, y_px, viewport);
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        if self.state == LifecycleState::Running {
            self.input.record_scroll(scroll_y);
        }
    }
}

impl<H: Host> Drop for Background<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
