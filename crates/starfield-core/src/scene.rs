use crate::camera::Camera;
use crate::config::BackgroundConfig;
use crate::meteors::MeteorShower;
use crate::particles::{ParticleLayer, StarVertex};
use crate::viewport::Viewport;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

pub struct Scene {
    pub camera: Camera,
    home_eye: Vec3,
    clear_color: [f32; 4],
    layers: SmallVec<[ParticleLayer; 4]>,
    meteors: Option<MeteorShower>,
    meteor_vertices: Vec<StarVertex>,
}

/// Builds the camera and empty scene for one mount.
pub struct SceneBuilder<'a> {
    config: &'a BackgroundConfig,
    viewport: Viewport,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a BackgroundConfig, viewport: Viewport) -> Self {
        Self { config, viewport }
    }

    pub fn build(self) -> Scene {
        let camera = Camera::perspective(self.viewport, self.config.camera_z);
        let meteors = self.config.meteors.map(MeteorShower::new);
        Scene {
            home_eye: camera.eye,
            camera,
            clear_color: self.config.clear_color,
            layers: SmallVec::new(),
            meteor_vertices: Vec::with_capacity(meteors.as_ref().map_or(0, |m| m.capacity())),
            meteors,
        }
    }
}

impl Scene {
    pub fn add_layer(&mut self, layer: ParticleLayer) {
        self.layers.push(layer);
    }

    #[inline]
    pub fn layers(&self) -> &[ParticleLayer] {
        &self.layers
    }

    #[inline]
    pub fn layers_mut(&mut self) -> &mut [ParticleLayer] {
        &mut self.layers
    }

    pub fn particle_count(&self) -> usize {
        self.layers.iter().map(|l| l.len()).sum()
    }

    /// Eye position with no pointer or scroll input.
    #[inline]
    pub fn home_eye(&self) -> Vec3 {
        self.home_eye
    }

    #[inline]
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    #[inline]
    pub fn meteors(&self) -> Option<&MeteorShower> {
        self.meteors.as_ref()
    }

    pub fn meteors_mut(&mut self) -> Option<&mut MeteorShower> {
        self.meteors.as_mut()
    }

    /// Upper bound on transient points drawn per frame.
    pub fn transient_capacity(&self) -> usize {
        self.meteors.as_ref().map_or(0, |m| m.capacity())
    }

    pub(crate) fn refresh_transients(&mut self) {
        match &self.meteors {
            Some(shower) => shower.write_vertices(&mut self.meteor_vertices),
            None => self.meteor_vertices.clear(),
        }
    }

    pub fn frame(&self, viewport: Viewport) -> FrameView<'_> {
        FrameView {
            view_projection: self.camera.view_projection(),
            layers: self
                .layers
                .iter()
                .map(|l| LayerDraw {
                    model: l.transform.model_matrix(),
                    opacity: l.opacity,
                })
                .collect(),
            transients: &self.meteor_vertices,
            clear_color: self.clear_color,
            viewport,
        }
    }
}

/// Per-layer draw parameters, in the same order as `Scene::layers`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerDraw {
    pub model: Mat4,
    pub opacity: f32,
}

/// Everything a renderer needs for one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    pub view_projection: Mat4,
    pub layers: SmallVec<[LayerDraw; 4]>,
    /// World-space points drawn with an identity model (meteors).
    pub transients: &'a [StarVertex],
    pub clear_color: [f32; 4],
    pub viewport: Viewport,
}
