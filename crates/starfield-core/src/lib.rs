pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod host;
pub mod input;
pub mod lifecycle;
pub mod meteors;
pub mod particles;
pub mod scene;
pub mod viewport;

pub use camera::Camera;
pub use color::{ChannelRange, ColorBand, Palette};
pub use config::*;
pub use driver::AnimationDriver;
pub use error::*;
pub use host::{Host, HostEvent, Renderer};
pub use input::InputState;
pub use lifecycle::{Background, LifecycleState, MountOutcome};
pub use meteors::{Meteor, MeteorShower};
pub use particles::{generate_field, LayerTransform, ParticleLayer, StarVertex};
pub use scene::{FrameView, LayerDraw, Scene, SceneBuilder};
pub use viewport::{Viewport, ViewportAdapter};
