//! Scene renderer: starfield, orbit paths, bodies, and rings in one pass.

use crate::buffer::{
    BodyInstance, BufferAllocator, InstanceBuffer, MeshBuffer, StarInstance, VertexBuffer,
    VertexPositionColor, VertexPositionNormal,
};
use crate::depth::DepthBuffer;
use crate::lit_pipeline::{BodyPipeline, LightUniform};
use crate::overlay::{OverlayFrame, OverlayRenderer};
use crate::pass::{FrameEncoder, RenderPassBuilder};
use crate::pipeline::{CameraUniform, LinePipeline, StarPipeline, camera_bind_group_layout};

/// Static geometry uploaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct SceneGeometry {
    pub stars: Vec<StarInstance>,
    pub orbit_lines: Vec<VertexPositionColor>,
    /// Unit sphere shared by every body, scaled per instance.
    pub sphere_vertices: Vec<VertexPositionNormal>,
    pub sphere_indices: Vec<u32>,
    /// Ring annulus for a unit-radius body, scaled per instance.
    pub ring_vertices: Vec<VertexPositionNormal>,
    pub ring_indices: Vec<u32>,
}

pub struct SceneRenderer {
    line_pipeline: LinePipeline,
    star_pipeline: StarPipeline,
    body_pipeline: BodyPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    depth: DepthBuffer,
    stars: wgpu::Buffer,
    star_count: u32,
    orbits: VertexBuffer,
    sphere: MeshBuffer,
    ring: MeshBuffer,
    bodies: InstanceBuffer<BodyInstance>,
    rings: InstanceBuffer<BodyInstance>,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        geometry: &SceneGeometry,
    ) -> Self {
        let camera_layout = camera_bind_group_layout(device);
        let line_pipeline = LinePipeline::new(device, &camera_layout, surface_format);
        let star_pipeline = StarPipeline::new(device, &camera_layout, surface_format);
        let body_pipeline = BodyPipeline::new(device, &camera_layout, surface_format);

        let allocator = BufferAllocator::new(device);
        let camera_buffer = allocator.create_uniform_buffer(
            "camera-uniform",
            &<CameraUniform as bytemuck::Zeroable>::zeroed(),
        );
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let light_buffer = allocator.create_uniform_buffer("light-uniform", &LightUniform::default());
        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light-bind-group"),
            layout: &body_pipeline.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "Scene geometry: {} stars, {} orbit vertices, sphere {} tris, ring {} tris",
            geometry.stars.len(),
            geometry.orbit_lines.len(),
            geometry.sphere_indices.len() / 3,
            geometry.ring_indices.len() / 3
        );

        Self {
            line_pipeline,
            star_pipeline,
            body_pipeline,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            depth: DepthBuffer::new(device, width, height),
            stars: allocator.create_vertex_buffer("stars", &geometry.stars),
            star_count: geometry.stars.len() as u32,
            orbits: allocator.create_vertices("orbit-lines", &geometry.orbit_lines),
            sphere: allocator.create_mesh(
                "body-sphere",
                &geometry.sphere_vertices,
                &geometry.sphere_indices,
            ),
            ring: allocator.create_mesh("body-ring", &geometry.ring_vertices, &geometry.ring_indices),
            bodies: InstanceBuffer::new(device, "body-instances", 16),
            rings: InstanceBuffer::new(device, "ring-instances", 4),
            clear_color: wgpu::Color::BLACK,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    pub fn set_clear_color(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> wgpu::Color {
        self.clear_color
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
    }

    pub fn update_light(&self, queue: &wgpu::Queue, light: &LightUniform) {
        queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(light));
    }

    /// Replace this frame's body and ring instances.
    pub fn update_bodies(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bodies: &[BodyInstance],
        rings: &[BodyInstance],
    ) {
        self.bodies.write(device, queue, bodies);
        self.rings.write(device, queue, rings);
    }

    /// Record the scene into `frame`.
    pub fn draw(&self, frame: &mut FrameEncoder<'_>) {
        let builder = RenderPassBuilder::new()
            .clear_color(self.clear_color)
            .depth(&self.depth.view)
            .label("scene-pass");
        let mut pass = frame.begin_render_pass(&builder);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);

        if self.star_count > 0 {
            pass.set_pipeline(&self.star_pipeline.pipeline);
            pass.set_vertex_buffer(0, self.stars.slice(..));
            pass.draw(0..StarPipeline::VERTICES_PER_STAR, 0..self.star_count);
        }

        pass.set_pipeline(&self.line_pipeline.pipeline);
        self.orbits.draw(&mut pass);

        pass.set_pipeline(&self.body_pipeline.pipeline);
        pass.set_bind_group(1, &self.light_bind_group, &[]);
        for (mesh, instances) in [(&self.sphere, &self.bodies), (&self.ring, &self.rings)] {
            if instances.is_empty() {
                continue;
            }
            mesh.bind(&mut pass);
            pass.set_vertex_buffer(1, instances.slice());
            mesh.draw_instanced(&mut pass, instances.len());
        }
    }

    /// Encode the scene with the UI on top, submit, and present.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_texture: wgpu::SurfaceTexture,
        overlay: &mut OverlayRenderer,
        ui: &OverlayFrame,
    ) {
        let mut frame = FrameEncoder::new(device, queue, surface_texture);
        self.draw(&mut frame);
        overlay.draw(device, queue, &mut frame, ui);
        frame.submit();
    }
}
