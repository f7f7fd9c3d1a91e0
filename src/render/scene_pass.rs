use super::helpers::{create_uniform_binding, make_fullscreen_pipeline, UniformBinding};
use crate::constants::MAX_SPHERES;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpherePacked {
    pub(crate) center_radius: [f32; 4],
    pub(crate) color: [f32; 4],
    /// rgb tint, w = glow strength (0 when not highlighted)
    pub(crate) glow: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) inv_view_proj: [[f32; 4]; 4],
    pub(crate) eye_time: [f32; 4],
    pub(crate) light: [f32; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) sphere_count: u32,
    pub(crate) glow_scale: f32,
    pub(crate) spheres: [SpherePacked; MAX_SPHERES],
}

pub(crate) struct SceneResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniforms: UniformBinding,
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> SceneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let uniforms = create_uniform_binding(
        device,
        "scene_uniforms",
        std::mem::size_of::<SceneUniforms>() as u64,
        wgpu::ShaderStages::FRAGMENT,
    );
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&uniforms.layout],
        push_constant_ranges: &[],
    });
    let pipeline = make_fullscreen_pipeline(device, &pl, &shader, "fs_scene", color_format, None);

    SceneResources { pipeline, uniforms }
}
