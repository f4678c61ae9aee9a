//! Per-page background configuration and the built-in presets.
//!
//! Every page shares one engine; what differs between pages (star density,
//! palette, spin, parallax, meteors) is expressed here.

use crate::color::Palette;
use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec2;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct LayerDescriptor {
    pub count: usize,
    pub base_size: f32,
    pub size_jitter: f32,
    pub palette: Palette,
    /// Added to every z coordinate of the layer.
    pub depth_offset: f32,
    /// Rotation added each tick, radians about (x, y).
    pub spin: Vec2,
    /// Extra rotation per tick about (x, y) at full pointer deflection. The
    /// x rotation follows the pointer's vertical position and the y rotation
    /// its horizontal position.
    pub pointer_spin: Vec2,
    pub opacity: f32,
}

impl Default for LayerDescriptor {
    fn default() -> Self {
        Self {
            count: 1000,
            base_size: 1.0,
            size_jitter: 0.0,
            palette: Palette::white(),
            depth_offset: 0.0,
            spin: Vec2::new(0.0, BASE_SPIN_Y),
            pointer_spin: Vec2::ZERO,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxConfig {
    pub pointer_strength: f32,
    pub scroll_strength: f32,
    pub damping: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            pointer_strength: 0.0,
            scroll_strength: 0.0,
            damping: CAMERA_DAMPING,
        }
    }
}

/// Slow vertical bob applied to every layer: `offset.y = sin(t * f) * a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftConfig {
    pub amplitude: f32,
    pub frequency_per_ms: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            amplitude: DRIFT_AMPLITUDE,
            frequency_per_ms: DRIFT_FREQUENCY_PER_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeteorConfig {
    pub spawn_interval_ms: f64,
    pub min_lifetime_ms: f64,
    pub max_lifetime_ms: f64,
    pub fall_step: f32,
    pub spread: f32,
    pub size: f32,
    pub depth: f32,
    pub capacity: usize,
}

impl Default for MeteorConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: METEOR_SPAWN_INTERVAL_MS,
            min_lifetime_ms: METEOR_MIN_LIFETIME_MS,
            max_lifetime_ms: METEOR_MAX_LIFETIME_MS,
            fall_step: METEOR_FALL_STEP,
            spread: METEOR_SPREAD,
            size: METEOR_SIZE,
            depth: 0.0,
            capacity: METEOR_CAPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundConfig {
    pub radius: f32,
    pub camera_z: f32,
    /// Premultiplied RGBA; fully transparent lets the page show through.
    pub clear_color: [f32; 4],
    pub layers: Vec<LayerDescriptor>,
    pub parallax: ParallaxConfig,
    pub drift: Option<DriftConfig>,
    pub meteors: Option<MeteorConfig>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_FIELD_RADIUS,
            camera_z: DEFAULT_CAMERA_Z,
            clear_color: [0.0; 4],
            layers: vec![LayerDescriptor::default()],
            parallax: ParallaxConfig::default(),
            drift: None,
            meteors: None,
        }
    }
}

impl BackgroundConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Home => Self {
                camera_z: 5.0,
                clear_color: [0.0, 0.0, 0.0, 1.0],
                layers: vec![LayerDescriptor {
                    count: 1000,
                    spin: Vec2::new(0.0, 0.001),
                    ..LayerDescriptor::default()
                }],
                meteors: Some(MeteorConfig::default()),
                ..Self::default()
            },
            Preset::About => Self {
                camera_z: 5.0,
                layers: vec![LayerDescriptor {
                    count: 1000,
                    base_size: 2.0,
                    spin: Vec2::new(0.0001, 0.0002),
                    ..LayerDescriptor::default()
                }],
                ..Self::default()
            },
            Preset::Experience | Preset::Projects | Preset::NotFound => Self {
                layers: vec![banded_layer(2000, 0.0, 1.0)],
                drift: Some(DriftConfig::default()),
                ..Self::default()
            },
            Preset::Layered => Self {
                layers: vec![
                    banded_layer(1500, -300.0, 0.25),
                    banded_layer(1000, -100.0, 0.5),
                    banded_layer(500, 0.0, 1.0),
                ],
                radius: LAYERED_FIELD_RADIUS,
                parallax: ParallaxConfig {
                    pointer_strength: POINTER_PARALLAX,
                    scroll_strength: SCROLL_PARALLAX,
                    damping: CAMERA_DAMPING,
                },
                drift: Some(DriftConfig::default()),
                ..Self::default()
            },
        }
    }

    pub fn particle_count(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }

    pub fn wants_pointer(&self) -> bool {
        self.parallax.pointer_strength != 0.0
            || self.layers.iter().any(|l| l.pointer_spin != Vec2::ZERO)
    }

    pub fn wants_scroll(&self) -> bool {
        self.parallax.scroll_strength != 0.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Radius(self.radius));
        }
        if !self.camera_z.is_finite() {
            return Err(ConfigError::CameraZ(self.camera_z));
        }
        let p = &self.parallax;
        if !(p.damping > 0.0 && p.damping < 1.0) {
            return Err(ConfigError::Damping(p.damping));
        }
        for s in [p.pointer_strength, p.scroll_strength] {
            if !s.is_finite() {
                return Err(ConfigError::Parallax(s));
            }
        }
        for (i, layer) in self.layers.iter().enumerate() {
            validate_layer(layer).map_err(|reason| ConfigError::Layer { layer: i, reason })?;
        }
        if let Some(d) = &self.drift {
            if !(d.amplitude.is_finite() && d.frequency_per_ms.is_finite()) {
                return Err(ConfigError::Drift("amplitude and frequency must be finite"));
            }
        }
        if let Some(m) = &self.meteors {
            if !(m.spawn_interval_ms > 0.0 && m.spawn_interval_ms.is_finite()) {
                return Err(ConfigError::Meteors("spawn interval must be positive"));
            }
            if !(m.min_lifetime_ms > 0.0 && m.min_lifetime_ms <= m.max_lifetime_ms) {
                return Err(ConfigError::Meteors("lifetimes must satisfy 0 < min <= max"));
            }
            if !m.max_lifetime_ms.is_finite() {
                return Err(ConfigError::Meteors("max lifetime must be finite"));
            }
            if m.capacity == 0 {
                return Err(ConfigError::Meteors("capacity must be non-zero"));
            }
            if !(m.size >= 0.0 && m.fall_step.is_finite() && m.depth.is_finite()) {
                return Err(ConfigError::Meteors("size, fall step and depth must be finite"));
            }
            if !(m.spread > 0.0 && m.spread.is_finite()) {
                return Err(ConfigError::Meteors("spread must be finite and positive"));
            }
        }
        Ok(())
    }
}

fn banded_layer(count: usize, depth_offset: f32, speed: f32) -> LayerDescriptor {
    LayerDescriptor {
        count,
        base_size: STAR_BASE_SIZE,
        size_jitter: STAR_SIZE_JITTER,
        palette: Palette::star_field(),
        depth_offset,
        spin: Vec2::new(BASE_SPIN_X, BASE_SPIN_Y) * speed,
        pointer_spin: Vec2::new(POINTER_SPIN_X, POINTER_SPIN_Y) * speed,
        opacity: STAR_OPACITY,
    }
}

fn validate_layer(layer: &LayerDescriptor) -> Result<(), &'static str> {
    if !(layer.base_size >= 0.0 && layer.base_size.is_finite()) {
        return Err("base size must be finite and non-negative");
    }
    if !(layer.size_jitter >= 0.0 && layer.size_jitter.is_finite()) {
        return Err("size jitter must be finite and non-negative");
    }
    if !layer.depth_offset.is_finite() {
        return Err("depth offset must be finite");
    }
    if !(layer.spin.is_finite() && layer.pointer_spin.is_finite()) {
        return Err("spin must be finite");
    }
    if !(0.0..=1.0).contains(&layer.opacity) {
        return Err("opacity must lie in [0, 1]");
    }
    match &layer.palette {
        Palette::Flat(rgb) => {
            if rgb.iter().any(|c| !c.is_finite()) {
                return Err("flat color must be finite");
            }
        }
        Palette::Banded(bands) => {
            if bands.is_empty() {
                return Err("banded palette needs at least one band");
            }
            if bands.iter().any(|b| !(b.weight >= 0.0 && b.weight.is_finite())) {
                return Err("band weights must be finite and non-negative");
            }
            if layer.palette.total_weight() <= 0.0 {
                return Err("band weights must not all be zero");
            }
            let bad_range = bands.iter().flat_map(|b| b.channels.iter()).any(|c| {
                !(c.min.is_finite() && c.span.is_finite() && c.span >= 0.0)
            });
            if bad_range {
                return Err("channel ranges must be finite with non-negative span");
            }
        }
    }
    Ok(())
}

/// Built-in page backgrounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Clears to opaque black rather than the transparent default used by
    /// every other preset. Adds falling meteors.
    Home,
    About,
    Experience,
    Projects,
    NotFound,
    /// Three depth bands with pointer and scroll parallax.
    Layered,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Home,
        Preset::About,
        Preset::Experience,
        Preset::Projects,
        Preset::NotFound,
        Preset::Layered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Home => "home",
            Preset::About => "about",
            Preset::Experience => "experience",
            Preset::Projects => "projects",
            Preset::NotFound => "not-found",
            Preset::Layered => "layered",
        }
    }

    pub fn config(self) -> BackgroundConfig {
        BackgroundConfig::preset(self)
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}
