use crate::constants::*;
use crate::core::{Camera, HighlightLayer, ObjectKind, ParticleSystem, Scene};
use web_sys as web;

mod helpers;
mod particles;
mod scene_pass;

use particles::{create_particle_resources, ParticleInstance, ParticleResources, ParticleUniforms};
use scene_pass::{create_scene_resources, SceneResources, SceneUniforms, SpherePacked};

/// Everything the frame needs from the world, borrowed for one draw.
pub struct FrameInputs<'s> {
    pub camera: &'s Camera,
    pub scene: &'s Scene,
    pub highlight: &'s HighlightLayer,
    pub particles: &'s ParticleSystem,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene_pass: SceneResources,
    particles: ParticleResources,
    instances: Vec<ParticleInstance>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
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
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
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
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_pass = create_scene_resources(&device, format);
        let particles = create_particle_resources(&device, format);
        let instances = Vec::with_capacity(particles.capacity);

        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_pass,
            particles,
            instances,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            time_accum: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, dt_sec: f32, inputs: FrameInputs<'_>) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);

        let scene_uniforms = self.pack_scene(&inputs);
        self.queue.write_buffer(
            &self.scene_pass.uniforms.buffer,
            0,
            bytemuck::bytes_of(&scene_uniforms),
        );

        let instance_count = self.pack_particles(inputs.particles);
        let (right, up) = inputs.camera.billboard_axes();
        let particle_uniforms = ParticleUniforms {
            view_proj: inputs.camera.view_projection().to_cols_array_2d(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
        };
        self.queue.write_buffer(
            &self.particles.uniforms.buffer,
            0,
            bytemuck::bytes_of(&particle_uniforms),
        );
        if instance_count > 0 {
            self.queue.write_buffer(
                &self.particles.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.scene_pass.pipeline);
            rpass.set_bind_group(0, &self.scene_pass.uniforms.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        if instance_count > 0 {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.particles.pipeline);
            rpass.set_bind_group(0, &self.particles.uniforms.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.particles.instance_buffer.slice(..));
            // Two triangles per billboard quad
            rpass.draw(0..6, 0..instance_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn pack_scene(&self, inputs: &FrameInputs<'_>) -> SceneUniforms {
        let camera = inputs.camera;
        let eye = camera.pose.position;
        let mut spheres = [SpherePacked::default(); MAX_SPHERES];
        let mut count = 0usize;
        for obj in inputs.scene.objects() {
            if count == MAX_SPHERES {
                log::warn!("[gpu] more than {} objects; extra ones are not drawn", MAX_SPHERES);
                break;
            }
            if obj.kind == ObjectKind::Mesh {
                continue;
            }
            let glow = match inputs.highlight.color_of(obj.id) {
                Some(c) => [c[0], c[1], c[2], HIGHLIGHT_GLOW_STRENGTH],
                None => [0.0; 4],
            };
            spheres[count] = SpherePacked {
                center_radius: obj.position.extend(obj.radius).to_array(),
                color: [obj.color[0], obj.color[1], obj.color[2], 1.0],
                glow,
            };
            count += 1;
        }
        SceneUniforms {
            inv_view_proj: camera.view_projection().inverse().to_cols_array_2d(),
            eye_time: [eye.x, eye.y, eye.z, self.time_accum],
            light: [
                LIGHT_DIRECTION[0],
                LIGHT_DIRECTION[1],
                LIGHT_DIRECTION[2],
                LIGHT_INTENSITY,
            ],
            resolution: [self.width as f32, self.height as f32],
            sphere_count: count as u32,
            glow_scale: HIGHLIGHT_GLOW_SCALE,
            spheres,
        }
    }

    fn pack_particles(&mut self, system: &ParticleSystem) -> u32 {
        self.instances.clear();
        for p in system.particles().iter().take(self.particles.capacity) {
            let alpha = p.life_fraction();
            self.instances.push(ParticleInstance {
                pos_size: p.position.extend(p.size).to_array(),
                color: [PARTICLE_COLOR[0], PARTICLE_COLOR[1], PARTICLE_COLOR[2], alpha],
            });
        }
        self.instances.len() as u32
    }
}
