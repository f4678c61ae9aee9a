use crate::config::LayerDescriptor;
use glam::{EulerRot, Mat4, Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;

/// One star as uploaded to the GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Aggregate transform of a layer; the only part of a layer that changes per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerTransform {
    pub rotation: Vec2,
    pub offset: Vec3,
}

impl LayerTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.offset)
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}

#[derive(Clone, Debug)]
pub struct ParticleLayer {
    stars: Vec<StarVertex>,
    depth_offset: f32,
    pub spin: Vec2,
    pub pointer_spin: Vec2,
    pub opacity: f32,
    pub transform: LayerTransform,
}

impl ParticleLayer {
    /// Draw `desc.count` stars inside the cube `[-radius, radius]^3`, shifted
    /// along z by the layer's depth offset. Positions are never resampled.
    pub fn generate<R: Rng + ?Sized>(desc: &LayerDescriptor, radius: f32, rng: &mut R) -> Self {
        let mut stars = Vec::with_capacity(desc.count);
        let extent = radius * 2.0;
        for _ in 0..desc.count {
            let x = (rng.gen::<f32>() - 0.5) * extent;
            let y = (rng.gen::<f32>() - 0.5) * extent;
            let z = (rng.gen::<f32>() - 0.5) * extent + desc.depth_offset;
            let size = if desc.size_jitter > 0.0 {
                desc.base_size + rng.gen::<f32>() * desc.size_jitter
            } else {
                desc.base_size
            };
            let [r, g, b] = desc.palette.sample(rng);
            stars.push(StarVertex {
                position: [x, y, z],
                size,
                color: [r, g, b, 1.0],
            });
        }
        Self {
            stars,
            depth_offset: desc.depth_offset,
            spin: desc.spin,
            pointer_spin: desc.pointer_spin,
            opacity: desc.opacity,
            transform: LayerTransform::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    #[inline]
    pub fn stars(&self) -> &[StarVertex] {
        &self.stars
    }

    #[inline]
    pub fn depth_offset(&self) -> f32 {
        self.depth_offset
    }

    /// Advance rotation by one tick for the given normalized pointer.
    /// Horizontal pointer movement turns the layer about y, vertical about x.
    pub fn spin_once(&mut self, pointer: Vec2) {
        self.transform.rotation += self.spin + self.pointer_spin * Vec2::new(pointer.y, pointer.x);
    }
}

pub fn generate_field<R: Rng + ?Sized>(
    descriptors: &[LayerDescriptor],
    radius: f32,
    rng: &mut R,
) -> SmallVec<[ParticleLayer; 4]> {
    descriptors
        .iter()
        .map(|d| ParticleLayer::generate(d, radius, rng))
        .collect()
}
