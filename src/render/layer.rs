use crate::constants::{LAYER_UNIFORM_SIZE, STAR_VERTEX_STRIDE};
use glam::Mat4;
use starfield_core::StarVertex;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LayerUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) opacity: f32,
    pub(crate) _pad: f32,
}

impl LayerUniforms {
    pub(crate) fn new(view_proj: Mat4, model: Mat4, resolution: [f32; 2], opacity: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            resolution,
            opacity,
            _pad: 0.0,
        }
    }
}

/// GPU-side copy of one layer: an instance buffer plus its uniforms.
pub(crate) struct LayerResources {
    pub(crate) instances: wgpu::Buffer,
    pub(crate) capacity: u32,
    pub(crate) count: u32,
    pub(crate) uniforms: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl LayerResources {
    /// Allocate room for `capacity` stars and upload `initial` into it.
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        capacity: usize,
        initial: &[StarVertex],
    ) -> Self {
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            // zero-sized vertex buffers are rejected by some backends
            size: capacity.max(1) as u64 * STAR_VERTEX_STRIDE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("star_layer_uniforms"),
            size: LAYER_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("star_layer_bg"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        let mut res = Self {
            instances,
            capacity: capacity as u32,
            count: 0,
            uniforms,
            bind_group,
        };
        res.write_instances(queue, initial);
        res
    }

    /// Replace the drawn stars; anything past capacity is dropped.
    pub(crate) fn write_instances(&mut self, queue: &wgpu::Queue, stars: &[StarVertex]) {
        let n = stars.len().min(self.capacity as usize);
        if n > 0 {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&stars[..n]));
        }
        self.count = n as u32;
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &LayerUniforms) {
        queue.write_buffer(&self.uniforms, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn destroy(&self) {
        self.instances.destroy();
        self.uniforms.destroy();
    }
}
