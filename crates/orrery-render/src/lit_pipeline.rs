//! Lit pipeline for bodies and rings.
//!
//! Camera at group 0, light at group 1. Geometry is [`VertexPositionNormal`]
//! in slot 0 with per-instance [`BodyInstance`] data in slot 1. Shading is
//! Blinn-Phong: flat ambient term plus one directional light.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::buffer::{BodyInstance, VertexPositionNormal};
use crate::depth::DepthBuffer;

/// Ambient and directional light parameters.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    /// Unit vector pointing toward the light, w = intensity.
    pub direction: [f32; 4],
    /// Light color, w unused.
    pub color: [f32; 4],
    /// Ambient color, w unused.
    pub ambient: [f32; 4],
    /// Specular color, w = shininess exponent.
    pub specular: [f32; 4],
}

impl LightUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(toward_light: Vec3, intensity: f32, color: [f32; 3], ambient: [f32; 3]) -> Self {
        let dir = toward_light.try_normalize().unwrap_or(Vec3::Y);
        Self {
            direction: dir.extend(intensity).to_array(),
            color: [color[0], color[1], color[2], 0.0],
            ambient: [ambient[0], ambient[1], ambient[2], 0.0],
            specular: [0x11 as f32 / 255.0, 0x11 as f32 / 255.0, 0x11 as f32 / 255.0, 30.0],
        }
    }
}

impl Default for LightUniform {
    /// Dim grey ambient (0x404040) and a white key light from (0, 1, 1).
    fn default() -> Self {
        let ambient = 0x40 as f32 / 255.0;
        Self::new(
            Vec3::new(0.0, 1.0, 1.0),
            1.0,
            [1.0; 3],
            [ambient; 3],
        )
    }
}

pub struct BodyPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub light_bind_group_layout: wgpu::BindGroupLayout,
}

impl BodyPipeline {
    pub fn new(
        device: &wgpu::Device,
        camera_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("light-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(LightUniform::SIZE),
                    },
                    count: None,
                }],
            });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("body-shader"),
            source: wgpu::ShaderSource::Wgsl(BODY_SHADER_SOURCE.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body-pipeline-layout"),
            bind_group_layouts: &[camera_layout, &light_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("body-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormal::layout(), BodyInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // Rings are visible from below; spheres are closed so the
                // depth test hides their back faces anyway.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            light_bind_group_layout,
        }
    }
}

pub const BODY_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    viewport: vec4<f32>,
};

struct LightUniform {
    direction: vec4<f32>,
    color: vec4<f32>,
    ambient: vec4<f32>,
    specular: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> light: LightUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) double_sided: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(instance.model_0, instance.model_1, instance.model_2, instance.model_3);
    let world = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    // Uniform scale only, so the model matrix transforms normals correctly.
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.color = instance.color;
    out.double_sided = instance.params.x;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front_facing: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (in.double_sided > 0.5 && !front_facing) {
        n = -n;
    }
    let l = light.direction.xyz;
    let v = normalize(camera.eye.xyz - in.world_position);
    let h = normalize(l + v);

    // Body colors are authored in sRGB.
    let base = pow(in.color.rgb, vec3<f32>(2.2));
    let n_dot_l = max(dot(n, l), 0.0);
    let radiance = light.color.rgb * light.direction.w;

    var specular = vec3<f32>(0.0);
    if (n_dot_l > 0.0) {
        specular = light.specular.rgb * radiance * pow(max(dot(n, h), 0.0), light.specular.w);
    }

    let lit = base * (light.ambient.rgb + radiance * n_dot_l) + specular;
    return vec4<f32>(lit, 1.0);
}
"#;
