//! Per-refresh animation loop.
//!
//! The driver never owns a timer. Each tick asks the host for the next
//! display refresh, so the chain ends as soon as the driver stops asking.
//! `stop` cancels the one outstanding request. Every callback carries the
//! handle it was requested under, and only the handle the driver is waiting
//! on may run a tick, so a callback the host had already dispatched before a
//! stop (or a stop and restart) does nothing.

use crate::config::BackgroundConfig;
use crate::error::HostError;
use crate::host::Host;
use crate::input::InputState;
use crate::scene::Scene;
use glam::Vec3;
use rand::Rng;

pub struct AnimationDriver<F> {
    pending: Option<F>,
    live: bool,
    ticks: u64,
}

impl<F> Default for AnimationDriver<F> {
    fn default() -> Self {
        Self {
            pending: None,
            live: false,
            ticks: 0,
        }
    }
}

impl<F> AnimationDriver<F> {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticks completed since the last `start`.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn start<H: Host<FrameHandle = F>>(&mut self, host: &mut H) -> Result<(), HostError> {
        if self.live {
            return Ok(());
        }
        self.live = true;
        self.ticks = 0;
        self.reschedule(host)
    }

    /// Consume the outstanding request if `fired` is it. Returns whether
    /// this tick may run.
    pub fn begin_frame(&mut self, fired: F) -> bool
    where
        F: PartialEq,
    {
        if !self.live || self.pending.as_ref() != Some(&fired) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn finish_frame(&mut self) {
        self.ticks += 1;
    }

    pub fn reschedule<H: Host<FrameHandle = F>>(&mut self, host: &mut H) -> Result<(), HostError> {
        if !self.live || self.pending.is_some() {
            return Ok(());
        }
        self.pending = Some(host.request_frame()?);
        Ok(())
    }

    /// Stop the chain. Returns whether the driver was running.
    pub fn stop<H: Host<FrameHandle = F>>(&mut self, host: &mut H) -> bool {
        let was_live = std::mem::replace(&mut self.live, false);
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        was_live
    }
}

/// Advance every animated part of the scene by one tick.
pub fn step_scene<R: Rng + ?Sized>(
    scene: &mut Scene,
    input: InputState,
    config: &BackgroundConfig,
    now_ms: f64,
    rng: &mut R,
) {
    let drift_y = config
        .drift
        .map(|d| ((now_ms * d.frequency_per_ms).sin() as f32) * d.amplitude);
    for layer in scene.layers_mut() {
        layer.spin_once(input.pointer);
        if let Some(y) = drift_y {
            layer.transform.offset.y = y;
        }
    }

    if let Some(shower) = scene.meteors_mut() {
        shower.update(now_ms, rng);
    }
    scene.refresh_transients();

    let target = parallax_target(scene.home_eye(), input, config);
    scene.camera.damp_toward(target, config.parallax.damping);
}

/// Where the eye wants to be for the given input.
#[inline]
pub fn parallax_target(home: Vec3, input: InputState, config: &BackgroundConfig) -> Vec3 {
    let p = &config.parallax;
    home + Vec3::new(
        input.pointer.x * p.pointer_strength,
        input.pointer.y * p.pointer_strength - input.scroll_y * p.scroll_strength,
        0.0,
    )
}
