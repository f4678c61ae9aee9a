#![cfg(target_arch = "wasm32")]
//! WebGPU starfield backgrounds for portfolio pages.
//!
//! ```js
//! const bg = await mountStarfield("starfield", "home");
//! // on navigation away
//! bg?.unmount();
//! ```

use starfield_core::{Background, MountOutcome, Preset};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod host;
mod input;
mod render;

use host::{Engine, WebHost};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web loaded");
    Ok(())
}

fn js_error(msg: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&msg.to_string()).into()
}

/// A mounted background. Dropping or unmounting it stops the animation and
/// releases every GPU buffer and window listener it holds.
#[wasm_bindgen]
pub struct StarfieldHandle {
    inner: Engine,
}

#[wasm_bindgen]
impl StarfieldHandle {
    /// Mount again after `unmount`, reusing the canvas and GPU device.
    /// Returns `true` when the background is running afterwards.
    pub fn mount(&self) -> Result<bool, JsValue> {
        let mut bg = self
            .inner
            .try_borrow_mut()
            .map_err(|_| js_error("starfield is busy"))?;
        if bg.is_running() {
            return Ok(true);
        }
        bg.mount()
            .map(|outcome| outcome == MountOutcome::Running)
            .map_err(js_error)
    }

    /// Returns `false` when the background was already torn down.
    pub fn unmount(&self) -> bool {
        match self.inner.try_borrow_mut() {
            Ok(mut bg) => bg.unmount(),
            Err(_) => {
                log::warn!("[starfield] unmount while busy ignored");
                false
            }
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.try_borrow().is_ok_and(|bg| bg.is_running())
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.inner
            .try_borrow()
            .ok()
            .and_then(|bg| bg.scene().map(|s| s.particle_count() as u32))
            .unwrap_or(0)
    }

    /// Name of the current lifecycle state, e.g. `"running"`.
    pub fn state(&self) -> String {
        self.inner
            .try_borrow()
            .map(|bg| bg.state().to_string())
            .unwrap_or_else(|_| "busy".into())
    }
}

/// Mount the named preset on the `<canvas>` with id `canvas_id`.
///
/// Resolves to `undefined` when there is nothing to draw on (no canvas, no
/// WebGPU); rejects only for an unknown preset or a failed mount.
#[wasm_bindgen(js_name = mountStarfield)]
pub async fn mount_starfield(
    canvas_id: String,
    preset: String,
) -> Result<Option<StarfieldHandle>, JsValue> {
    let preset = preset.parse::<Preset>().map_err(js_error)?;

    let Some((window, document)) = dom::window_document() else {
        log::warn!("[starfield] no window/document");
        return Ok(None);
    };
    let Some(canvas) = dom::find_canvas(&document, &canvas_id) else {
        log::warn!("[starfield] missing <canvas id=\"{}\">", canvas_id);
        return Ok(None);
    };

    let gpu = match render::GpuContext::new(&canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    };

    let background =
        Background::new(WebHost::new(window, canvas, gpu), preset.config()).map_err(js_error)?;
    let engine: Engine = Rc::new(RefCell::new(background));
    engine
        .borrow_mut()
        .host_mut()
        .attach(Rc::downgrade(&engine));

    let outcome = engine.borrow_mut().mount();
    match outcome {
        Ok(MountOutcome::Running) => {
            log::info!("[starfield] preset {} running", preset.name());
            Ok(Some(StarfieldHandle { inner: engine }))
        }
        Ok(MountOutcome::Skipped) => Ok(None),
        Err(e) => Err(js_error(e)),
    }
}
