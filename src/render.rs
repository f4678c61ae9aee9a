use crate::dom;
use glam::Mat4;
use starfield_core::{FrameView, RenderError, Renderer, Scene, Viewport};
use std::rc::Rc;
use web_sys as web;

mod layer;
mod pipeline;
use layer::{LayerResources, LayerUniforms};
use pipeline::{create_star_pipeline, StarPipeline};

pub static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");

/// Device, surface and pipeline shared by every mount on one canvas.
pub struct GpuContext {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
    alpha_mode: wgpu::CompositeAlphaMode,
    stars: StarPipeline,
}

impl GpuContext {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("starfield_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the page must show through wherever no star is drawn
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let stars = create_star_pipeline(&device, format);
        log::info!("[gpu] ready: format={:?} alpha={:?}", format, alpha_mode);

        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            format,
            alpha_mode,
            stars,
        })
    }

    fn surface_config(&self, width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: self.alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Per-mount GPU resources drawing one `Scene` onto the shared surface.
pub struct StarRenderer {
    gpu: Rc<GpuContext>,
    config: wgpu::SurfaceConfiguration,
    layers: Vec<LayerResources>,
    transients: Option<LayerResources>,
    released: bool,
}

impl StarRenderer {
    pub fn new(gpu: Rc<GpuContext>, viewport: Viewport) -> Self {
        let (w, h) = dom::sync_canvas_backing_size(&gpu.canvas, viewport.width, viewport.height);
        let config = gpu.surface_config(w, h);
        gpu.surface.configure(&gpu.device, &config);
        Self {
            gpu,
            config,
            layers: Vec::new(),
            transients: None,
            released: false,
        }
    }

    fn reconfigure(&self) {
        self.gpu.surface.configure(&self.gpu.device, &self.config);
    }

    fn destroy_buffers(&mut self) {
        for layer in self.layers.drain(..) {
            layer.destroy();
        }
        if let Some(t) = self.transients.take() {
            t.destroy();
        }
    }
}

impl Renderer for StarRenderer {
    fn upload(&mut self, scene: &Scene) {
        self.destroy_buffers();
        let gpu = &self.gpu;
        self.layers = scene
            .layers()
            .iter()
            .map(|layer| {
                LayerResources::new(
                    &gpu.device,
                    &gpu.queue,
                    &gpu.stars.layer_bgl,
                    "star_layer_instances",
                    layer.len(),
                    layer.stars(),
                )
            })
            .collect();
        let capacity = scene.transient_capacity();
        self.transients = (capacity > 0).then(|| {
            LayerResources::new(
                &gpu.device,
                &gpu.queue,
                &gpu.stars.layer_bgl,
                "star_transient_instances",
                capacity,
                &[],
            )
        });
        log::info!(
            "[gpu] uploaded {} layers, {} stars, {} transient slots",
            self.layers.len(),
            scene.particle_count(),
            capacity
        );
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.released {
            log::debug!("[gpu] resize after release ignored");
            return;
        }
        let (w, h) =
            dom::sync_canvas_backing_size(&self.gpu.canvas, viewport.width, viewport.height);
        if w == self.config.width && h == self.config.height {
            return;
        }
        self.config.width = w;
        self.config.height = h;
        self.reconfigure();
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), RenderError> {
        if self.released {
            return Err(RenderError::Released);
        }
        let surface_tex = match self.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // skip this frame; the next one draws into the new swapchain
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let gpu = &self.gpu;
        let resolution = [self.config.width as f32, self.config.height as f32];

        for (res, draw) in self.layers.iter().zip(frame.layers.iter()) {
            res.write_uniforms(
                &gpu.queue,
                &LayerUniforms::new(frame.view_projection, draw.model, resolution, draw.opacity),
            );
        }
        if let Some(t) = self.transients.as_mut() {
            t.write_instances(&gpu.queue, frame.transients);
            t.write_uniforms(
                &gpu.queue,
                &LayerUniforms::new(frame.view_projection, Mat4::IDENTITY, resolution, 1.0),
            );
        }

        let [r, g, b, a] = frame.clear_color;
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("starfield_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stars_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&gpu.stars.pipeline);
            let drawn = self
                .layers
                .iter()
                .take(frame.layers.len())
                .chain(self.transients.iter());
            for res in drawn.filter(|r| r.count > 0) {
                rpass.set_bind_group(0, &res.bind_group, &[]);
                rpass.set_vertex_buffer(0, res.instances.slice(..));
                rpass.draw(0..crate::constants::QUAD_CORNERS, 0..res.count);
            }
        }
        gpu.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.destroy_buffers();
        self.released = true;
        log::info!("[gpu] released star buffers");
    }
}
