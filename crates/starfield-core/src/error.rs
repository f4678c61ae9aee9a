use crate::lifecycle::LifecycleState;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("field radius must be finite and positive, got {0}")]
    Radius(f32),
    #[error("camera z must be finite, got {0}")]
    CameraZ(f32),
    #[error("damping must lie strictly between 0 and 1, got {0}")]
    Damping(f32),
    #[error("parallax strength must be finite, got {0}")]
    Parallax(f32),
    #[error("layer {layer}: {reason}")]
    Layer { layer: usize, reason: &'static str },
    #[error("drift: {0}")]
    Drift(&'static str),
    #[error("meteors: {0}")]
    Meteors(&'static str),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("frame scheduling failed: {0}")]
    Schedule(String),
    #[error("listener registration failed: {0}")]
    Listen(String),
    #[error("renderer initialisation failed: {0}")]
    Renderer(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("renderer resources already released")]
    Released,
    #[error("surface error: {0}")]
    Surface(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot mount while {0}")]
    AlreadyMounted(LifecycleState),
    #[error(transparent)]
    Host(#[from] HostError),
}
